//! Errors that can occur while recognizing input.

use std::fmt;

use serde::Serialize;

use setfold_core::DomainKind;

use super::cursor::Position;

/// Failures that stop a run. Recognition errors never do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Execution fuel exhausted (too many recognizer steps).
    #[error("runtime execution limit exceeded ({0} steps)")]
    ExecFuelExhausted(u32),

    /// Recursion fuel exhausted (too many nested rule calls).
    #[error("runtime recursion limit exceeded ({0} nested calls)")]
    RecursionLimitExceeded(u32),

    #[error("rule `{0}` is not defined")]
    UnknownRule(String),

    /// A rule was started on input of the other domain.
    #[error("`{rule}` is a {kind} rule")]
    WrongDomain { rule: String, kind: DomainKind },
}

/// What went wrong at one input position.
///
/// The messages are matched verbatim by downstream tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecognitionErrorKind {
    /// No lexer rule matches; `text` runs from the token start to the offending character.
    #[error("token recognition error at: '{text}'")]
    TokenRecognition { text: String },

    /// The expected symbol was absent and has been assumed present.
    #[error("missing {expected} at '{found}'")]
    Missing { expected: String, found: String },

    /// One unexpected symbol was skipped.
    #[error("extraneous input '{found}' expecting {expected}")]
    Extraneous { found: String, expected: String },

    #[error("mismatched input '{found}' expecting {expected}")]
    Mismatched { found: String, expected: String },

    /// No alternative of a branch block matched.
    #[error("no viable alternative at input '{found}'")]
    NoViableAlternative { found: String },
}

/// A recoverable error delivered to an [`ErrorListener`](super::ErrorListener).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecognitionError {
    pub kind: RecognitionErrorKind,
    pub line: u32,
    pub column: u32,
}

impl RecognitionError {
    pub fn new(kind: RecognitionErrorKind, position: Position) -> Self {
        Self {
            kind,
            line: position.line,
            column: position.column,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// The offending input for lexer errors, the expected set for parser errors.
    pub fn offending_or_expected(&self) -> &str {
        match &self.kind {
            RecognitionErrorKind::TokenRecognition { text } => text,
            RecognitionErrorKind::Missing { expected, .. }
            | RecognitionErrorKind::Extraneous { expected, .. }
            | RecognitionErrorKind::Mismatched { expected, .. } => expected,
            RecognitionErrorKind::NoViableAlternative { found } => found,
        }
    }
}

impl fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{} {}", self.line, self.column, self.kind)
    }
}
