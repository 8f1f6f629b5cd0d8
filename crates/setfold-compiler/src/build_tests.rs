use setfold_core::{Domain, Symbol, SymbolSet};

use crate::Element as E;
use crate::analyze::{Analysis, Collapsible, analyze};
use crate::build::{build_set, union_sources};
use crate::compile::CompileError;

fn collapsible(alternatives: &[E], domain: &Domain) -> Collapsible {
    match analyze(alternatives, domain) {
        Analysis::Collapsible(c) => c,
        Analysis::NotCollapsible(reason) => panic!("expected collapsible, got {reason}"),
    }
}

fn bounds(set: &SymbolSet) -> Vec<(Symbol, Symbol)> {
    set.intervals().iter().map(|i| (i.low(), i.high())).collect()
}

#[test]
fn literals_merge_into_ranges() {
    let domain = Domain::lexer();
    let c = collapsible(&[E::ch('c'), E::ch('a'), E::ch('b'), E::ch('x')], &domain);
    let set = build_set(&c, &domain).unwrap().admissible;
    assert_eq!(bounds(&set), vec![('a' as u32, 'c' as u32), ('x' as u32, 'x' as u32)]);
}

#[test]
fn classes_union_in_directly() {
    let domain = Domain::lexer();
    let c = collapsible(&[E::range('a', 'f'), E::ch('g'), E::class("AaBb")], &domain);
    let set = build_set(&c, &domain).unwrap().admissible;
    assert_eq!(bounds(&set), vec![('A' as u32, 'B' as u32), ('a' as u32, 'g' as u32)]);
}

#[test]
fn negation_complements_within_parser_domain() {
    let domain = Domain::parser(5);
    let c = collapsible(&[E::not(E::token(2)), E::not(E::token(3))], &domain);
    let built = build_set(&c, &domain).unwrap();
    assert!(built.negated);
    assert_eq!(bounds(&built.named), vec![(2, 3)]);
    assert_eq!(bounds(&built.admissible), vec![(1, 1), (4, 5)]);
}

#[test]
fn negation_of_whole_domain_is_empty() {
    let domain = Domain::parser(1);
    let c = collapsible(&[E::not(E::token(1))], &domain);
    assert!(build_set(&c, &domain).unwrap().admissible.is_empty());
}

#[test]
fn lexer_complement_excludes_named_symbols_only() {
    let domain = Domain::lexer();
    let c = collapsible(&[E::not(E::block(crate::Block::new(vec![E::ch('b'), E::ch('c')])))], &domain);
    let set = build_set(&c, &domain).unwrap().admissible;
    assert_eq!(
        bounds(&set),
        vec![(0, 'a' as u32), ('d' as u32, setfold_core::MAX_CODE_POINT)]
    );
}

#[test]
fn union_rejects_out_of_domain_literal() {
    let domain = Domain::parser(3);
    let err = union_sources(&[crate::SetSource::Literal(7)], &domain).unwrap_err();
    assert!(matches!(err, CompileError::OutOfDomain(_)));
    insta::assert_snapshot!(err, @"symbol 7 is outside the parser domain [1, 3]");
}

#[test]
fn collapsed_set_accepts_exactly_the_alternatives() {
    let domain = Domain::parser(20);
    let alternatives = [E::token(3), E::token(4), E::token(9), E::token(20)];
    let c = collapsible(&alternatives, &domain);
    let set = build_set(&c, &domain).unwrap().admissible;

    for symbol in domain.min()..=domain.max() {
        let branch_accepts = alternatives
            .iter()
            .any(|alt| matches!(alt, E::SingleLiteral(s) if *s == symbol));
        assert_eq!(set.contains(symbol), branch_accepts, "symbol {symbol}");
    }
}

#[test]
fn negated_set_rejects_exactly_the_alternatives() {
    let domain = Domain::parser(20);
    let named = [2, 3, 11];
    let alternatives: Vec<_> = named.iter().map(|&t| E::not(E::token(t))).collect();
    let c = collapsible(&alternatives, &domain);
    let set = build_set(&c, &domain).unwrap().admissible;

    for symbol in domain.min()..=domain.max() {
        assert_eq!(set.contains(symbol), !named.contains(&symbol), "symbol {symbol}");
    }
}
