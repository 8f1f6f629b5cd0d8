//! Compile-time diagnostics.
//!
//! Grammar problems never abort compilation: each one is reported here and
//! the offending alternative is dropped, so one pass surfaces every problem.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

/// Findings of one compilation, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// A diagnostic under construction. Nothing is recorded until [`emit`](Self::emit).
#[must_use = "call .emit() to record the diagnostic"]
pub struct DiagnosticBuilder<'d> {
    sink: &'d mut Vec<DiagnosticMessage>,
    pending: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a diagnostic of `kind` at `range`, with the kind's summary as message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: &mut self.messages,
            pending: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.messages.iter()
    }

    fn count(&self, severity: Severity) -> usize {
        self.iter().filter(|d| d.severity() == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.iter().any(DiagnosticMessage::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.iter().any(DiagnosticMessage::is_warning)
    }

    /// Kinds in report order.
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.iter().map(DiagnosticMessage::kind).collect()
    }

    /// One diagnostic per rule and range: the highest-priority kind wins,
    /// the rest are dropped. Report order is otherwise kept.
    pub fn filtered(&self) -> Vec<DiagnosticMessage> {
        self.iter()
            .filter(|d| {
                !self.iter().any(|other| {
                    other.range == d.range && other.rule == d.rule && other.kind < d.kind
                })
            })
            .cloned()
            .collect()
    }

    /// Render every diagnostic against the grammar source.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}

impl DiagnosticBuilder<'_> {
    /// Replace the summary with the kind's detailed message for `detail`.
    pub fn message(mut self, detail: impl AsRef<str>) -> Self {
        self.pending.message = self.pending.kind.detailed(detail.as_ref());
        self
    }

    /// Rule the diagnostic was raised in.
    pub fn rule(mut self, name: impl Into<String>) -> Self {
        self.pending.rule = Some(name.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.pending.hints.push(hint.into());
        self
    }

    pub fn emit(self) {
        self.sink.push(self.pending);
    }
}
