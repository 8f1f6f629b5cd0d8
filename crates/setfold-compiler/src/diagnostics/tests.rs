use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidNegationTarget, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 0..5: negation requires a single-symbol operand"
    );
}

#[test]
fn report_with_custom_message_and_rule() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, range(3, 6))
        .message("FOO")
        .rule("expr")
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 3..6 in `expr`: `FOO` is not defined"
    );
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyComplement, range(0, 1))
        .message("~{'a'..'z'}")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"warning at 0..1: negated set matches nothing: ~{'a'..'z'}"
    );
}

#[test]
fn hints_render_in_plain_output() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::LabelOnNonSet, range(0, 4))
        .message("t")
        .hint("move the label onto a single-symbol alternative")
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 0..4: label `t` is assigned to a block which is not a set (hint: move the label onto a single-symbol alternative)"
    );
}

#[test]
fn filtered_keeps_highest_priority_per_range() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, range(0, 3))
        .rule("a")
        .emit();
    diagnostics
        .report(DiagnosticKind::InvalidNegationTarget, range(0, 3))
        .rule("a")
        .emit();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, range(4, 6))
        .rule("a")
        .emit();

    let kinds: Vec<_> = diagnostics.filtered().iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::InvalidNegationTarget,
            DiagnosticKind::UndefinedRule
        ]
    );
}

#[test]
fn render_with_source() {
    let source = "a : ~('x' 'y') ;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidNegationTarget, range(4, 14))
        .emit();

    let rendered = diagnostics.render(source);
    assert!(rendered.contains("error: negation requires a single-symbol operand"));
    assert!(rendered.contains("a : ~('x' 'y') ;"));
}

#[test]
fn colored_output_is_styled() {
    let source = "a : ~('x' 'y') ;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidNegationTarget, range(4, 14))
        .emit();

    let plain = diagnostics.printer().source(source).render();
    let colored = diagnostics.printer().source(source).colored(true).render();
    assert!(!plain.contains('\u{1b}'));
    assert!(colored.contains('\u{1b}'));
}

#[test]
fn empty_diagnostics_render_nothing() {
    let diagnostics = Diagnostics::new();
    assert_eq!(diagnostics.render("x"), "");
    assert_eq!(diagnostics.printer().render(), "");
}
