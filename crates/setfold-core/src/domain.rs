//! Symbol domains.
//!
//! A domain is the full range of valid symbols in one collapsing context.
//! It is an explicit value passed to every analysis call; nothing reads
//! alphabet bounds from ambient state.

use serde::Serialize;

use crate::{SetError, Symbol, SymbolInterval, SymbolSet};

/// Largest Unicode code point.
pub const MAX_CODE_POINT: Symbol = 0x10FFFF;

/// Which kind of rule a domain belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// Characters (Unicode code points).
    Lexer,
    /// Token types.
    Parser,
}

impl std::fmt::Display for DomainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexer => write!(f, "lexer"),
            Self::Parser => write!(f, "parser"),
        }
    }
}

/// Immutable `[min, max]` symbol bounds for one compilation unit.
///
/// The end-of-input sentinel is never part of a domain.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Domain {
    kind: DomainKind,
    min: Symbol,
    max: Symbol,
}

impl Domain {
    /// All Unicode code points.
    pub fn lexer() -> Self {
        Self {
            kind: DomainKind::Lexer,
            min: 0,
            max: MAX_CODE_POINT,
        }
    }

    /// Token types `1..=max_token_type`. Empty when `max_token_type` is 0.
    pub fn parser(max_token_type: Symbol) -> Self {
        Self {
            kind: DomainKind::Parser,
            min: 1,
            max: max_token_type,
        }
    }

    pub fn kind(&self) -> DomainKind {
        self.kind
    }

    pub fn min(&self) -> Symbol {
        self.min
    }

    pub fn max(&self) -> Symbol {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.min <= symbol && symbol <= self.max
    }

    /// The whole domain as a set.
    pub fn full_set(&self) -> SymbolSet {
        if self.is_empty() {
            return SymbolSet::empty();
        }
        SymbolSet::from_intervals([SymbolInterval::ordered(self.min, self.max)])
    }

    /// Reject symbols outside the domain.
    pub fn check(&self, symbol: Symbol) -> Result<(), SetError> {
        if self.contains(symbol) {
            return Ok(());
        }
        Err(SetError::OutOfDomain {
            symbol,
            kind: self.kind,
            min: self.min,
            max: self.max,
        })
    }

    /// Reject sets with members outside the domain, naming the first offender.
    pub fn check_set(&self, set: &SymbolSet) -> Result<(), SetError> {
        for iv in set.intervals() {
            self.check(iv.low())?;
            self.check(iv.high())?;
        }
        Ok(())
    }
}
