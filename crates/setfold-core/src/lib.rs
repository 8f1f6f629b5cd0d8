#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for setfold.
//!
//! Everything here is shared between the compiler (which builds sets from
//! grammar alternatives) and the runtime (which tests input symbols against them):
//! - **Intervals**: inclusive `[low, high]` symbol ranges
//! - **Sets**: canonical, sorted, non-overlapping interval sequences
//! - **Domains**: the full range of admissible symbols for lexer or parser rules
//! - **Vocabulary**: token-type display names used in runtime messages

mod display;
mod domain;
mod interval;
mod invariants;
mod quantifier;
mod set;
mod vocabulary;

#[cfg(test)]
mod display_tests;
#[cfg(test)]
mod domain_tests;

pub use display::{SetDisplay, escape_display};
pub use domain::{Domain, DomainKind, MAX_CODE_POINT};
pub use interval::SymbolInterval;
pub use quantifier::Quantifier;
pub use set::SymbolSet;
pub use vocabulary::Vocabulary;

/// A symbol value: a Unicode code point for lexer rules, a token type for parser rules.
pub type Symbol = u32;

/// Errors raised when constructing intervals or sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
    /// Interval bounds are reversed.
    #[error("invalid interval: {low} > {high}")]
    InvalidInterval { low: Symbol, high: Symbol },

    /// Symbol lies outside the domain it is used in.
    #[error("symbol {symbol} is outside the {kind} domain [{min}, {max}]")]
    OutOfDomain {
        symbol: Symbol,
        kind: DomainKind,
        min: Symbol,
        max: Symbol,
    },
}
