//! Set transitions: collapsed alternations and single-symbol elements.
//!
//! A quantified set needs no branching automaton. Membership is decided per
//! symbol, so `?`, `*` and `+` become one greedy loop around the set test
//! with the quantifier's bounds as exit condition.

use setfold_core::{Domain, Quantifier};

use crate::analyze::{Collapsible, negation_sources, single_source};
use crate::ast::AlternativeElement;
use crate::build::{BuiltSet, build_set, union_sources};
use crate::ir::CompiledSetTransition;

use super::CompileError;

/// Wrap the set named by `collapsible` in `quantifier`.
pub fn compile_set(
    collapsible: &Collapsible,
    quantifier: Quantifier,
    label: Option<String>,
    domain: &Domain,
) -> Result<CompiledSetTransition, CompileError> {
    let built = build_set(collapsible, domain)?;
    Ok(CompiledSetTransition::from_built(built, quantifier, label, *domain))
}

/// Transition for one single-symbol element of a sequence.
pub(super) fn compile_single(
    element: &AlternativeElement,
    domain: &Domain,
) -> Result<Option<CompiledSetTransition>, CompileError> {
    let (sources, negated) = match element {
        AlternativeElement::SingleLiteral(_) | AlternativeElement::Class(_) => {
            (vec![single_source(element, domain)?], false)
        }
        AlternativeElement::Negated(inner) => (negation_sources(inner, domain)?, true),
        _ => return Ok(None),
    };
    let built = BuiltSet::new(union_sources(&sources, domain)?, negated, domain);
    Ok(Some(CompiledSetTransition::from_built(
        built,
        Quantifier::None,
        None,
        *domain,
    )))
}
