//! Inclusive symbol intervals.

use serde::Serialize;

use crate::{SetError, Symbol};

/// Inclusive `[low, high]` range of symbols. Invariant: `low <= high`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct SymbolInterval {
    low: Symbol,
    high: Symbol,
}

impl SymbolInterval {
    /// Create an interval, rejecting reversed bounds.
    pub fn new(low: Symbol, high: Symbol) -> Result<Self, SetError> {
        if low > high {
            return Err(SetError::InvalidInterval { low, high });
        }
        Ok(Self { low, high })
    }

    /// Interval holding exactly one symbol.
    pub fn single(symbol: Symbol) -> Self {
        Self {
            low: symbol,
            high: symbol,
        }
    }

    /// Bounds already known to be ordered.
    pub(crate) fn ordered(low: Symbol, high: Symbol) -> Self {
        debug_assert!(low <= high, "interval bounds reversed: {low} > {high}");
        Self { low, high }
    }

    #[inline]
    pub fn low(self) -> Symbol {
        self.low
    }

    #[inline]
    pub fn high(self) -> Symbol {
        self.high
    }

    /// Number of symbols covered.
    pub fn len(self) -> u64 {
        u64::from(self.high) - u64::from(self.low) + 1
    }

    /// Always false; an interval covers at least one symbol.
    pub fn is_empty(self) -> bool {
        false
    }

    pub fn is_single(self) -> bool {
        self.low == self.high
    }

    #[inline]
    pub fn contains(self, symbol: Symbol) -> bool {
        self.low <= symbol && symbol <= self.high
    }

    /// Whether `next` overlaps or directly follows this interval.
    ///
    /// Requires `self.low <= next.low`.
    pub(crate) fn touches(self, next: Self) -> bool {
        u64::from(next.low) <= u64::from(self.high) + 1
    }
}

impl From<Symbol> for SymbolInterval {
    fn from(symbol: Symbol) -> Self {
        Self::single(symbol)
    }
}
