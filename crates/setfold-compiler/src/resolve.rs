//! Rule-reference resolution pre-pass.
//!
//! Runs once per grammar before any rule is analyzed:
//! - lexer rules that match exactly one symbol are resolved to their
//!   admissible set, so references to them can be inlined as classes
//! - parser references to token rules become token literals
//!
//! Resolution is conservative: a reference is inlined only if the referenced
//! rule resolves totally and without cycles. Everything else stays a call.

use indexmap::IndexMap;

use setfold_core::{Domain, DomainKind, SymbolSet};

use crate::analyze::{Analysis, analyze};
use crate::ast::{AlternativeElement, Block, Grammar};
use crate::build::build_set;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Admissible sets of lexer rules that match exactly one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentTable {
    sets: IndexMap<String, SymbolSet>,
}

impl FragmentTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve every lexer rule of `grammar`, reporting reference cycles.
    pub fn build(grammar: &Grammar, diagnostics: &mut Diagnostics) -> Self {
        let mut resolver = Resolver {
            grammar,
            diagnostics,
            done: IndexMap::new(),
            in_progress: Vec::new(),
        };
        for rule in grammar.rules().filter(|r| r.is_lexer()) {
            resolver.resolve(&rule.name);
        }
        let sets = resolver
            .done
            .into_iter()
            .filter_map(|(name, set)| Some((name, set?)))
            .collect();
        Self { sets }
    }

    pub fn get(&self, name: &str) -> Option<&SymbolSet> {
        self.sets.get(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

struct Resolver<'g, 'd> {
    grammar: &'g Grammar,
    diagnostics: &'d mut Diagnostics,
    done: IndexMap<String, Option<SymbolSet>>,
    in_progress: Vec<String>,
}

impl Resolver<'_, '_> {
    fn resolve(&mut self, name: &str) -> Option<SymbolSet> {
        if let Some(done) = self.done.get(name) {
            return done.clone();
        }
        let grammar = self.grammar;
        let rule = grammar.rule(name)?;
        if !rule.is_lexer() || rule.command.is_some() || !rule.body.is_plain() {
            self.done.insert(name.to_string(), None);
            return None;
        }
        if self.in_progress.iter().any(|n| n == name) {
            self.diagnostics
                .report(DiagnosticKind::FragmentCycle, rule.span)
                .message(name)
                .rule(name)
                .emit();
            return None;
        }

        self.in_progress.push(name.to_string());
        let alternatives: Vec<_> = rule
            .body
            .alternatives
            .iter()
            .map(|alt| {
                rewrite(alt, false, &mut |target| {
                    self.resolve(target).map(AlternativeElement::Class)
                })
            })
            .collect();
        self.in_progress.pop();

        let domain = Domain::lexer();
        let resolved = match analyze(&alternatives, &domain) {
            Analysis::Collapsible(c) => build_set(&c, &domain).ok().map(|built| built.admissible),
            Analysis::NotCollapsible(_) => None,
        };
        self.done.insert(name.to_string(), resolved.clone());
        resolved
    }
}

/// Copy of `block` with resolvable references replaced.
///
/// In lexer rules, references to single-symbol rules become classes. In
/// parser rules, references to token rules become token literals.
pub fn resolve_block(
    block: &Block,
    kind: DomainKind,
    grammar: &Grammar,
    table: &FragmentTable,
) -> Block {
    let mut replace = |name: &str| match kind {
        DomainKind::Lexer => table.get(name).cloned().map(AlternativeElement::Class),
        DomainKind::Parser => grammar
            .rule(name)
            .filter(|r| r.is_lexer())
            .and_then(|r| r.token_type)
            .map(AlternativeElement::SingleLiteral),
    };
    rewrite_block(block, true, &mut replace)
}

fn rewrite_block(
    block: &Block,
    deep: bool,
    replace: &mut impl FnMut(&str) -> Option<AlternativeElement>,
) -> Block {
    Block {
        alternatives: block
            .alternatives
            .iter()
            .map(|alt| rewrite(alt, deep, replace))
            .collect(),
        quantifier: block.quantifier,
        label: block.label.clone(),
        span: block.span,
    }
}

/// Replace references in `element`.
///
/// Shallow rewriting only visits positions where a single symbol can stand
/// for the whole alternative: the element itself, a negation operand, and
/// plain sub-blocks. Deep rewriting visits every position.
fn rewrite(
    element: &AlternativeElement,
    deep: bool,
    replace: &mut impl FnMut(&str) -> Option<AlternativeElement>,
) -> AlternativeElement {
    match element {
        AlternativeElement::RuleReference(name) => {
            replace(name).unwrap_or_else(|| element.clone())
        }
        AlternativeElement::Negated(inner) => {
            AlternativeElement::Negated(Box::new(rewrite(inner, deep, replace)))
        }
        AlternativeElement::Block(block) if deep || block.is_plain() => {
            AlternativeElement::Block(Box::new(rewrite_block(block, deep, replace)))
        }
        AlternativeElement::Sequence(items) if deep => AlternativeElement::Sequence(
            items.iter().map(|item| rewrite(item, deep, replace)).collect(),
        ),
        _ => element.clone(),
    }
}
