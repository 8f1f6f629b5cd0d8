//! Branch blocks for alternations that must not collapse.
//!
//! Alternatives keep their declaration order; the recognizer tries them in
//! that order and takes the first that matches its whole sequence. Single
//! symbols inside an alternative still compile to set transitions.

use crate::analyze::FallbackReason;
use crate::ast::{AlternativeElement, Block};
use crate::diagnostics::DiagnosticKind;
use crate::ir::{BranchBlock, CompiledAlternative, CompiledBlock, CompiledElement};

use super::RuleCompiler;
use super::quantified::compile_single;

impl RuleCompiler<'_> {
    pub(super) fn compile_fallback(
        &mut self,
        block: &Block,
        alternatives: &[AlternativeElement],
        reason: FallbackReason,
    ) -> CompiledBlock {
        // With collapsing disabled the label still names a single symbol.
        let label = block.label.clone().filter(|_| reason == FallbackReason::Disabled);
        if let (Some(label), None) = (&block.label, &label) {
            self.diagnostics
                .report(DiagnosticKind::LabelOnNonSet, block.span)
                .message(label)
                .rule(&self.rule.name)
                .emit();
        }

        let alternatives = alternatives
            .iter()
            .map(|alt| self.compile_alternative(alt, block))
            .collect();

        CompiledBlock::Branches(BranchBlock {
            alternatives,
            quantifier: block.quantifier,
            label,
            reason,
        })
    }

    fn compile_alternative(
        &mut self,
        element: &AlternativeElement,
        block: &Block,
    ) -> CompiledAlternative {
        let elements = match element {
            AlternativeElement::Sequence(items) => items
                .iter()
                .filter_map(|item| self.compile_element(item, block))
                .collect(),
            other => self.compile_element(other, block).into_iter().collect(),
        };
        CompiledAlternative { elements }
    }

    fn compile_element(
        &mut self,
        element: &AlternativeElement,
        block: &Block,
    ) -> Option<CompiledElement> {
        match element {
            AlternativeElement::RuleReference(name) => Some(CompiledElement::Call {
                rule: name.clone(),
            }),
            AlternativeElement::Block(inner) => {
                Some(CompiledElement::Block(self.compile_block(inner)))
            }
            AlternativeElement::Sequence(_) => {
                let nested = Block::of(element.clone()).span(block.span);
                Some(CompiledElement::Block(self.compile_block(&nested)))
            }
            AlternativeElement::SingleLiteral(_)
            | AlternativeElement::Class(_)
            | AlternativeElement::Negated(_) => match compile_single(element, &self.domain) {
                Ok(transition) => {
                    let transition = transition?;
                    self.check_empty_complement(&transition, block);
                    Some(CompiledElement::Set(transition))
                }
                Err(err) => {
                    self.report(&err, block);
                    None
                }
            },
        }
    }
}
