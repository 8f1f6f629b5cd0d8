use setfold_compiler::{Block, Element as E, Grammar};

use super::test_utils::{compile, dump_tokens, lex};
use super::{ErrorCollector, Lexer, Position, RuntimeError};

fn identifiers() -> Grammar {
    let mut g = Grammar::new("T");
    g.token("IF", Block::of(E::text("if")));
    g.token("ID", Block::of(E::range('a', 'z')).plus());
    g.skip("WS", Block::new(vec![E::ch(' '), E::ch('\n')]).plus());
    g
}

#[test]
fn longest_match_wins() {
    insta::assert_snapshot!(dump_tokens(&compile(&identifiers()), "if ifx"), @r"
    IF 'if'
    ID 'ifx'
    EOF '<EOF>'
    ");
}

#[test]
fn earliest_rule_breaks_ties() {
    let mut g = Grammar::new("T");
    g.token("ID", Block::of(E::range('a', 'z')).plus());
    g.token("IF", Block::of(E::text("if")));

    insta::assert_snapshot!(dump_tokens(&compile(&g), "if"), @r"
    ID 'if'
    EOF '<EOF>'
    ");
}

#[test]
fn empty_input_is_just_eof() {
    let (tokens, errors) = lex(&compile(&identifiers()), "");
    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
    assert_eq!(tokens[0].position, Position::new(1, 0));
}

#[test]
fn positions_span_lines() {
    let (tokens, _) = lex(&compile(&identifiers()), "ab\n  cd");
    let positions: Vec<_> = tokens.iter().map(|t| t.position.to_string()).collect();
    assert_eq!(positions, ["1:0", "2:2", "2:4"]);
    assert_eq!((tokens[1].start, tokens[1].stop), (5, 7));
}

#[test]
fn error_covers_longest_attempt() {
    let mut g = Grammar::new("T");
    g.token("A", Block::of(E::text("ab")));
    g.token("B", Block::of(E::text("cb")));
    let compiled = compile(&g);

    insta::assert_snapshot!(dump_tokens(&compiled, "ac"), @r"
    line 1:0 token recognition error at: 'ac'
    EOF '<EOF>'
    ");
    insta::assert_snapshot!(dump_tokens(&compiled, "acab"), @r"
    line 1:0 token recognition error at: 'ac'
    A 'ab'
    EOF '<EOF>'
    ");
}

#[test]
fn reported_text_is_not_lexed_again() {
    let mut g = Grammar::new("T");
    g.token("A", Block::of(E::text("ab")));
    g.token("B", Block::of(E::text("cb")));

    let (tokens, errors) = lex(&compile(&g), "acb");
    insta::assert_snapshot!(errors.render(), @r"
    line 1:0 token recognition error at: 'ac'
    line 1:2 token recognition error at: 'b'
    ");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());

    let (tokens, errors) = lex(&compile(&g), "a");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].to_string(), "line 1:0 token recognition error at: 'a'");
    assert_eq!(tokens[0].start, 1);
}

#[test]
fn error_text_is_escaped() {
    let mut g = Grammar::new("T");
    g.token("A", Block::of(E::ch('a')));
    g.skip("WS", Block::of(E::ch(' ')));

    insta::assert_snapshot!(dump_tokens(&compile(&g), "a\nb"), @r"
    line 1:1 token recognition error at: '\n'
    line 2:0 token recognition error at: 'b'
    A 'a'
    EOF '<EOF>'
    ");
}

#[test]
fn zero_length_match_is_not_a_token() {
    let mut g = Grammar::new("T");
    g.token("A", Block::of(E::ch('a')).star());

    insta::assert_snapshot!(dump_tokens(&compile(&g), "ab"), @r"
    line 1:1 token recognition error at: 'b'
    A 'a'
    EOF '<EOF>'
    ");
}

#[test]
fn fragment_is_called() {
    let mut g = Grammar::new("T");
    g.fragment("PAIR", Block::of(E::text("ab")));
    g.token("PAIRS", Block::of(E::reference("PAIR")).plus());
    let compiled = compile(&g);

    insta::assert_snapshot!(dump_tokens(&compiled, "abab"), @r"
    PAIRS 'abab'
    EOF '<EOF>'
    ");
    insta::assert_snapshot!(dump_tokens(&compiled, "aba"), @r"
    line 1:2 token recognition error at: 'a'
    PAIRS 'ab'
    EOF '<EOF>'
    ");
}

#[test]
fn skipped_text_leaves_no_token() {
    let (tokens, errors) = lex(&compile(&identifiers()), "  \n ");
    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].position, Position::new(2, 1));
}

#[test]
fn exec_fuel_is_enforced() {
    let mut g = Grammar::new("T");
    g.token("A", Block::of(E::ch('a')));
    let compiled = compile(&g);

    let lexer = Lexer::builder(&compiled).exec_fuel(3).build();
    let err = lexer
        .tokenize("aaaa", &mut ErrorCollector::new())
        .unwrap_err();
    assert!(matches!(err, RuntimeError::ExecFuelExhausted(3)));
    insta::assert_snapshot!(err, @"runtime execution limit exceeded (3 steps)");
}

#[test]
fn recursion_limit_is_enforced() {
    let mut g = Grammar::new("T");
    g.fragment("NEST", Block::of(E::seq(vec![E::ch('('), E::reference("NEST")])));
    g.token("A", Block::of(E::reference("NEST")));
    let compiled = compile(&g);

    let lexer = Lexer::builder(&compiled).recursion_limit(4).build();
    let err = lexer
        .tokenize("((((((", &mut ErrorCollector::new())
        .unwrap_err();
    assert!(matches!(err, RuntimeError::RecursionLimitExceeded(4)));
}
