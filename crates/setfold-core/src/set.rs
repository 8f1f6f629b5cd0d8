//! Canonical symbol sets.
//!
//! A set is stored as a sorted sequence of disjoint, non-adjacent intervals.
//! Every constructor canonicalizes, so two sets are equal iff their interval
//! sequences are equal.

use serde::Serialize;

use crate::{Domain, SetError, Symbol, SymbolInterval};

/// Canonical set of symbols.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct SymbolSet {
    intervals: Vec<SymbolInterval>,
}

impl SymbolSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(symbol: Symbol) -> Self {
        Self {
            intervals: vec![SymbolInterval::single(symbol)],
        }
    }

    /// Set covering `low..=high`.
    pub fn range(low: Symbol, high: Symbol) -> Result<Self, SetError> {
        Ok(Self {
            intervals: vec![SymbolInterval::new(low, high)?],
        })
    }

    /// Build from arbitrary intervals (unsorted, overlapping, adjacent).
    pub fn from_intervals(intervals: impl IntoIterator<Item = SymbolInterval>) -> Self {
        Self {
            intervals: canonicalize(intervals.into_iter().collect()),
        }
    }

    /// Build from individual symbols. Duplicates are dropped.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self::from_intervals(symbols.into_iter().map(SymbolInterval::single))
    }

    /// Build from the characters of a string (e.g. a bracketed class body).
    pub fn from_chars(chars: &str) -> Self {
        Self::from_symbols(chars.chars().map(u32::from))
    }

    pub fn intervals(&self) -> &[SymbolInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of symbols in the set.
    pub fn len(&self) -> u64 {
        self.intervals.iter().map(|iv| iv.len()).sum()
    }

    pub fn min(&self) -> Option<Symbol> {
        self.intervals.first().map(|iv| iv.low())
    }

    pub fn max(&self) -> Option<Symbol> {
        self.intervals.last().map(|iv| iv.high())
    }

    /// Membership test, `O(log k)` in the interval count.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.intervals
            .binary_search_by(|iv| {
                if iv.high() < symbol {
                    std::cmp::Ordering::Less
                } else if iv.low() > symbol {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Iterate over every member symbol in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.intervals.iter().flat_map(|iv| iv.low()..=iv.high())
    }

    pub fn union(&self, other: &SymbolSet) -> SymbolSet {
        let merged = self
            .intervals
            .iter()
            .chain(other.intervals.iter())
            .copied()
            .collect();
        Self {
            intervals: canonicalize(merged),
        }
    }

    /// Every symbol of `domain` that is not in this set.
    ///
    /// Members outside the domain are ignored, so the result is always a
    /// subset of the domain and complementing twice yields `self ∩ domain`.
    pub fn complement(&self, domain: &Domain) -> SymbolSet {
        let mut out = Vec::with_capacity(self.intervals.len() + 1);
        if domain.is_empty() {
            return Self { intervals: out };
        }

        let min = u64::from(domain.min());
        let max = u64::from(domain.max());
        let mut next = min;

        for iv in &self.intervals {
            let (low, high) = (u64::from(iv.low()), u64::from(iv.high()));
            if high < min {
                continue;
            }
            if low > max {
                break;
            }
            if low > next {
                out.push(SymbolInterval::ordered(next as Symbol, (low - 1) as Symbol));
            }
            next = next.max(high + 1);
        }

        if next <= max {
            out.push(SymbolInterval::ordered(next as Symbol, max as Symbol));
        }

        Self { intervals: out }
    }

    /// Intersection with the domain bounds.
    pub fn clamp(&self, domain: &Domain) -> SymbolSet {
        if domain.is_empty() {
            return SymbolSet::empty();
        }
        let intervals = self
            .intervals
            .iter()
            .filter(|iv| iv.high() >= domain.min() && iv.low() <= domain.max())
            .map(|iv| {
                SymbolInterval::ordered(iv.low().max(domain.min()), iv.high().min(domain.max()))
            })
            .collect();
        Self { intervals }
    }

    /// Whether every member lies within `domain`.
    pub fn is_within(&self, domain: &Domain) -> bool {
        match (self.min(), self.max()) {
            (Some(lo), Some(hi)) => domain.contains(lo) && domain.contains(hi),
            _ => true,
        }
    }

    /// Whether the interval sequence is sorted, disjoint, and non-adjacent.
    pub fn is_canonical(&self) -> bool {
        self.intervals.windows(2).all(|w| !w[0].touches(w[1]))
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self::from_symbols(iter)
    }
}

impl FromIterator<SymbolInterval> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = SymbolInterval>>(iter: T) -> Self {
        Self::from_intervals(iter)
    }
}

/// Sort by lower bound, then merge overlapping or adjacent intervals in one pass.
fn canonicalize(mut intervals: Vec<SymbolInterval>) -> Vec<SymbolInterval> {
    if intervals.len() < 2 {
        return intervals;
    }
    intervals.sort_unstable();

    let mut merged: Vec<SymbolInterval> = Vec::with_capacity(intervals.len());
    let mut current = intervals[0];

    for &next in &intervals[1..] {
        if current.touches(next) {
            current = SymbolInterval::ordered(current.low(), current.high().max(next.high()));
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}
