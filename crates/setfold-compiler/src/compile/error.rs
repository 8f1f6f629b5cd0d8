//! Per-alternative compile errors.
//!
//! None of these abort a grammar: the compiler reports each as a diagnostic
//! and drops the offending alternative.

use setfold_core::{DomainKind, SetError};

use crate::diagnostics::DiagnosticKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// `~x` where `x` can match more or less than one symbol.
    #[error("cannot negate {0}")]
    InvalidNegationTarget(&'static str),

    /// Literal outside the rule's symbol domain.
    #[error(transparent)]
    OutOfDomain(#[from] SetError),

    /// Character class used in a parser rule.
    #[error("character class in a {0} rule")]
    ClassOutsideLexer(DomainKind),

    /// Reference across domains: a lexer rule calling a parser rule, or a
    /// parser rule calling a fragment.
    #[error("{kind} rule cannot reference `{name}`")]
    CrossDomainReference { kind: DomainKind, name: String },

    #[error("`{0}` is not defined")]
    UndefinedRule(String),

    /// Parser reference to a lexer rule that emits no token.
    #[error("`{0}` does not define a token type")]
    NoTokenType(String),
}

impl CompileError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::InvalidNegationTarget(_) => DiagnosticKind::InvalidNegationTarget,
            Self::OutOfDomain(_)
            | Self::ClassOutsideLexer(_)
            | Self::CrossDomainReference { .. } => DiagnosticKind::InconsistentDomain,
            Self::UndefinedRule(_) => DiagnosticKind::UndefinedRule,
            Self::NoTokenType(_) => DiagnosticKind::UnknownTokenType,
        }
    }

    /// Detail text for the diagnostic template of [`Self::kind`].
    pub fn detail(&self) -> String {
        match self {
            Self::UndefinedRule(name) | Self::NoTokenType(name) => name.clone(),
            other => other.to_string(),
        }
    }
}
