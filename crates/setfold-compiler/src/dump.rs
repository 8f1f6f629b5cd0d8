//! Human-readable dump of a compiled grammar, one rule per line.
//!
//! Collapsed blocks print as their set, branch blocks print in grammar
//! notation:
//!
//! ```text
//! A : {'A'..'B', 'a'..'b'}
//! C : A | B  // fallback: rule reference
//! WS : {'\n', ' '}+ -> skip
//! ```

use std::fmt::Write as _;

use setfold_core::{DomainKind, Quantifier, SetDisplay, Vocabulary};

use crate::ast::LexerCommand;
use crate::ir::{
    BranchBlock, CompiledAlternative, CompiledBlock, CompiledElement, CompiledGrammar,
    CompiledSetTransition,
};

impl CompiledGrammar {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for rule in self.rules() {
            let ctx = DumpContext {
                vocabulary: &self.vocabulary,
                kind: rule.kind,
            };
            if rule.fragment {
                out.push_str("fragment ");
            }
            write!(out, "{} : ", rule.name).expect("String write never fails");
            match &rule.body {
                CompiledBlock::Branches(b) if b.label.is_none() && b.quantifier == Quantifier::None => {
                    ctx.alternatives(&mut out, b);
                }
                body => ctx.block(&mut out, body),
            }
            if let Some(LexerCommand::Skip) = rule.command {
                out.push_str(" -> skip");
            }
            if let Some(reason) = rule.body.fallback_reason() {
                write!(out, "  // fallback: {reason}").expect("String write never fails");
            }
            out.push('\n');
        }
        out
    }
}

struct DumpContext<'a> {
    vocabulary: &'a Vocabulary,
    kind: DomainKind,
}

impl DumpContext<'_> {
    fn transition(&self, out: &mut String, t: &CompiledSetTransition) {
        if let Some(label) = t.label() {
            write!(out, "{label}=").expect("String write never fails");
        }
        if t.is_negated() {
            out.push('~');
        }
        let set = SetDisplay::new(t.set(), self.kind).vocabulary(self.vocabulary);
        write!(out, "{set}{}", t.quantifier().suffix()).expect("String write never fails");
    }

    fn block(&self, out: &mut String, block: &CompiledBlock) {
        match block {
            CompiledBlock::Set(t) => self.transition(out, t),
            CompiledBlock::Branches(b) => {
                if let Some(label) = &b.label {
                    write!(out, "{label}=").expect("String write never fails");
                }
                out.push('(');
                self.alternatives(out, b);
                out.push(')');
                out.push_str(b.quantifier.suffix());
            }
        }
    }

    fn alternatives(&self, out: &mut String, block: &BranchBlock) {
        for (i, alt) in block.alternatives.iter().enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            self.alternative(out, alt);
        }
    }

    fn alternative(&self, out: &mut String, alt: &CompiledAlternative) {
        if alt.elements.is_empty() {
            out.push('ε');
            return;
        }
        for (i, element) in alt.elements.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match element {
                CompiledElement::Set(t) => self.transition(out, t),
                CompiledElement::Call { rule } => out.push_str(rule),
                CompiledElement::Block(b) => self.block(out, b),
            }
        }
    }
}
