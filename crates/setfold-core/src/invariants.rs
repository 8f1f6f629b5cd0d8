//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Domain, SymbolSet};

impl SymbolSet {
    /// Panic unless the set is canonical and lies within `domain`.
    ///
    /// Compiled sets are built once and then trusted by the runtime matcher,
    /// so the builder checks this before handing a set out.
    pub fn ensure_canonical_in(&self, domain: &Domain) -> &Self {
        assert!(
            self.is_canonical(),
            "SymbolSet: intervals not canonical: {:?}",
            self.intervals()
        );
        assert!(
            self.is_within(domain),
            "SymbolSet: members outside {} domain [{}, {}]",
            domain.kind(),
            domain.min(),
            domain.max()
        );
        self
    }
}
