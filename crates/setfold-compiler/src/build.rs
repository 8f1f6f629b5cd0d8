//! Set construction from collapsible alternatives.

use setfold_core::{Domain, SymbolInterval, SymbolSet};

use crate::analyze::{Collapsible, SetSource};
use crate::compile::CompileError;

/// Union of the named symbols, canonical and checked against `domain`.
pub fn union_sources(sources: &[SetSource], domain: &Domain) -> Result<SymbolSet, CompileError> {
    let mut intervals = Vec::with_capacity(sources.len());
    for source in sources {
        match source {
            SetSource::Literal(symbol) => {
                domain.check(*symbol)?;
                intervals.push(SymbolInterval::single(*symbol));
            }
            SetSource::Class(class) => {
                domain.check_set(class)?;
                intervals.extend_from_slice(class.intervals());
            }
        }
    }
    Ok(SymbolSet::from_intervals(intervals))
}

/// Symbols of a set transition: those named by the alternatives, and
/// those the transition admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltSet {
    pub named: SymbolSet,
    pub negated: bool,
    /// `named`, or its complement against the domain when `negated`.
    pub admissible: SymbolSet,
}

impl BuiltSet {
    /// End of input is never in a domain, so a negated set never admits it.
    pub fn new(named: SymbolSet, negated: bool, domain: &Domain) -> Self {
        let admissible = if negated {
            named.complement(domain)
        } else {
            named.clone()
        };
        Self {
            named,
            negated,
            admissible,
        }
    }
}

/// Union the alternatives' symbols, then complement them if negated.
pub fn build_set(collapsible: &Collapsible, domain: &Domain) -> Result<BuiltSet, CompileError> {
    let named = union_sources(collapsible.sources(), domain)?;
    let built = BuiltSet::new(named, collapsible.is_negated(), domain);
    built.admissible.ensure_canonical_in(domain);
    Ok(built)
}
