use crate::{Domain, DomainKind, MAX_CODE_POINT, SetError, SymbolSet};

#[test]
fn lexer_domain_covers_code_points() {
    let domain = Domain::lexer();
    assert_eq!(domain.kind(), DomainKind::Lexer);
    assert!(domain.contains(0));
    assert!(domain.contains(MAX_CODE_POINT));
    assert!(!domain.contains(MAX_CODE_POINT + 1));
}

#[test]
fn parser_domain_starts_at_one() {
    let domain = Domain::parser(4);
    assert_eq!(domain.kind(), DomainKind::Parser);
    assert!(!domain.contains(0));
    assert!(domain.contains(1));
    assert!(domain.contains(4));
    assert!(!domain.contains(5));
    assert_eq!(domain.full_set(), SymbolSet::range(1, 4).unwrap());
}

#[test]
fn check_reports_out_of_domain_symbol() {
    let domain = Domain::parser(2);
    assert_eq!(domain.check(2), Ok(()));
    let err = domain.check(3).unwrap_err();
    assert_eq!(
        err,
        SetError::OutOfDomain {
            symbol: 3,
            kind: DomainKind::Parser,
            min: 1,
            max: 2,
        }
    );
    insta::assert_snapshot!(err.to_string(), @"symbol 3 is outside the parser domain [1, 2]");
}

#[test]
fn check_set_names_first_offender() {
    let domain = Domain::parser(5);
    assert!(domain.check_set(&SymbolSet::from_symbols([1, 5])).is_ok());
    let err = domain
        .check_set(&SymbolSet::from_symbols([0, 3]))
        .unwrap_err();
    assert!(matches!(err, SetError::OutOfDomain { symbol: 0, .. }));
}
