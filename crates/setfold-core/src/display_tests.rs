use crate::{DomainKind, SetDisplay, SymbolSet, Vocabulary, escape_display};

fn lexer(set: &SymbolSet) -> String {
    SetDisplay::new(set, DomainKind::Lexer).to_string()
}

#[test]
fn lexer_single_member_is_bare() {
    insta::assert_snapshot!(lexer(&SymbolSet::single('x' as u32)), @"'x'");
}

#[test]
fn lexer_members_and_ranges() {
    insta::assert_snapshot!(lexer(&SymbolSet::from_chars("AaBb")), @"{'A'..'B', 'a'..'b'}");
    insta::assert_snapshot!(lexer(&SymbolSet::from_chars("xz")), @"{'x', 'z'}");
}

#[test]
fn lexer_single_range_is_braced() {
    let set = SymbolSet::range('a' as u32, 'z' as u32).unwrap();
    insta::assert_snapshot!(lexer(&set), @"{'a'..'z'}");
}

#[test]
fn empty_set_renders_braces() {
    insta::assert_snapshot!(lexer(&SymbolSet::empty()), @"{}");
    let set = SymbolSet::empty();
    let parser = SetDisplay::new(&set, DomainKind::Parser).to_string();
    assert_eq!(parser, "{}");
}

#[test]
fn lexer_escapes_whitespace() {
    insta::assert_snapshot!(lexer(&SymbolSet::from_chars("\n\t")), @r"{'\t'..'\n'}");
}

#[test]
fn parser_uses_vocabulary_names() {
    let mut vocabulary = Vocabulary::new();
    vocabulary.define(1, Some("'x'"), Some("T__0"));
    vocabulary.define(2, Some("'y'"), Some("T__1"));
    vocabulary.define(3, None, Some("ID"));

    let set = SymbolSet::from_symbols([1, 2, 3, 7]);
    let text = SetDisplay::new(&set, DomainKind::Parser)
        .vocabulary(&vocabulary)
        .to_string();
    insta::assert_snapshot!(text, @"{'x', 'y', ID, 7}");
}

#[test]
fn parser_without_vocabulary_prints_numbers() {
    let set = SymbolSet::single(4);
    assert_eq!(SetDisplay::new(&set, DomainKind::Parser).to_string(), "4");
}

#[test]
fn escape_display_rewrites_control_chars() {
    assert_eq!(escape_display("a\nb\r\tc"), "a\\nb\\r\\tc");
    assert_eq!(escape_display("plain"), "plain");
}
