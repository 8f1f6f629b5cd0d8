//! Grammar compilation.
//!
//! Each rule is compiled independently from its (resolved) body:
//! - collapsible blocks become one [`CompiledSetTransition`]
//! - everything else becomes ordered branches, see `fallback`
//!
//! Problems are reported as diagnostics and the offending alternative is
//! dropped; its block falls back to ordered branches and compilation of the
//! remaining grammar continues.
//!
//! # Module Organization
//!
//! - `quantified`: set transitions for collapsed blocks and single elements
//! - `fallback`: branch blocks that keep declaration order
//! - `error`: per-alternative errors

mod error;
mod fallback;
mod quantified;


use indexmap::IndexMap;

use setfold_core::{Domain, DomainKind, SetDisplay};

use crate::analyze::{Analysis, FallbackReason, analyze, check_alternative, reason_for};
use crate::ast::{AlternativeElement, Block, Grammar, Rule};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{CompiledBlock, CompiledGrammar, CompiledRule, CompiledSetTransition};
use crate::options::CompileOptions;
use crate::resolve::{FragmentTable, resolve_block};
use crate::{Error, Result};

pub use error::CompileError;
pub use quantified::compile_set;

/// Compiles a [`Grammar`] into a [`CompiledGrammar`].
pub struct GrammarCompiler<'g> {
    grammar: &'g Grammar,
    options: CompileOptions,
}

impl<'g> GrammarCompiler<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            options: CompileOptions::default(),
        }
    }

    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Compile, failing if any error diagnostic was reported.
    pub fn compile(self) -> Result<CompiledGrammar> {
        let (compiled, diagnostics) = self.compile_lenient();
        if diagnostics.has_errors() {
            return Err(Error::GrammarCompileError(diagnostics));
        }
        Ok(compiled)
    }

    /// Compile everything that can be compiled and return the diagnostics
    /// alongside. Rejected alternatives are missing from the result.
    pub fn compile_lenient(self) -> (CompiledGrammar, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let fragments = if self.options.resolve_fragments {
            FragmentTable::build(self.grammar, &mut diagnostics)
        } else {
            FragmentTable::empty()
        };

        let mut rules = IndexMap::with_capacity(self.grammar.rules().count());
        for rule in self.grammar.rules() {
            let compiled = RuleCompiler {
                grammar: self.grammar,
                options: self.options,
                domain: self.grammar.domain(rule.kind),
                rule,
                diagnostics: &mut diagnostics,
            }
            .compile(&fragments);
            rules.insert(rule.name.clone(), compiled);
        }

        let compiled = CompiledGrammar {
            name: self.grammar.name().to_string(),
            lexer_domain: self.grammar.domain(DomainKind::Lexer),
            parser_domain: self.grammar.domain(DomainKind::Parser),
            vocabulary: self.grammar.vocabulary().clone(),
            rules,
        };
        (compiled, diagnostics)
    }
}

/// Compiler state for one rule.
pub(crate) struct RuleCompiler<'a> {
    grammar: &'a Grammar,
    options: CompileOptions,
    domain: Domain,
    rule: &'a Rule,
    diagnostics: &'a mut Diagnostics,
}

impl RuleCompiler<'_> {
    fn compile(mut self, fragments: &FragmentTable) -> CompiledRule {
        let rule = self.rule;
        let body = resolve_block(&rule.body, rule.kind, self.grammar, fragments);
        CompiledRule {
            name: rule.name.clone(),
            kind: rule.kind,
            fragment: rule.fragment,
            command: rule.command,
            token_type: rule.token_type,
            body: self.compile_block(&body),
        }
    }

    pub(crate) fn compile_block(&mut self, block: &Block) -> CompiledBlock {
        let (alternatives, rejected) = self.valid_alternatives(block);

        let analysis = match rejected {
            Some(reason) => Analysis::NotCollapsible(reason),
            None => analyze(&alternatives, &self.domain),
        };
        let analysis = match analysis {
            // Negated sets have no branching form; keep them collapsed.
            Analysis::Collapsible(c) if !self.options.collapse_sets && !c.is_negated() => {
                Analysis::NotCollapsible(FallbackReason::Disabled)
            }
            other => other,
        };

        match analysis {
            Analysis::Collapsible(collapsible) => {
                match compile_set(&collapsible, block.quantifier, block.label.clone(), &self.domain) {
                    Ok(transition) => {
                        self.check_empty_complement(&transition, block);
                        CompiledBlock::Set(transition)
                    }
                    Err(err) => {
                        self.report(&err, block);
                        self.compile_fallback(block, &alternatives, reason_for(&err))
                    }
                }
            }
            Analysis::NotCollapsible(reason) => self.compile_fallback(block, &alternatives, reason),
        }
    }

    /// Alternatives of `block` that pass validation; the rest are reported
    /// and dropped. A block that lost an alternative never collapses, so the
    /// strongest rejection reason comes back alongside.
    fn valid_alternatives(
        &mut self,
        block: &Block,
    ) -> (Vec<AlternativeElement>, Option<FallbackReason>) {
        let mut valid = Vec::with_capacity(block.alternatives.len());
        let mut rejected: Option<FallbackReason> = None;
        for alternative in &block.alternatives {
            let checked = check_alternative(alternative, &self.domain)
                .and_then(|()| self.check_references(alternative));
            match checked {
                Ok(()) => valid.push(alternative.clone()),
                Err(err) => {
                    let reason = reason_for(&err);
                    rejected = Some(rejected.map_or(reason, |r| r.min(reason)));
                    self.report(&err, block);
                }
            }
        }
        (valid, rejected)
    }

    /// Rule references of one alternative, outside nested blocks.
    fn check_references(&self, element: &AlternativeElement) -> std::result::Result<(), CompileError> {
        match element {
            AlternativeElement::RuleReference(name) => self.check_reference(name),
            AlternativeElement::Sequence(items) => items
                .iter()
                .try_for_each(|item| self.check_references(item)),
            _ => Ok(()),
        }
    }

    fn check_reference(&self, name: &str) -> std::result::Result<(), CompileError> {
        let Some(target) = self.grammar.rule(name) else {
            return Err(CompileError::UndefinedRule(name.to_string()));
        };
        let cross_domain = || CompileError::CrossDomainReference {
            kind: self.rule.kind,
            name: name.to_string(),
        };
        match (self.rule.kind, target.kind) {
            (DomainKind::Lexer, DomainKind::Parser) => Err(cross_domain()),
            (DomainKind::Parser, DomainKind::Lexer) if target.fragment => Err(cross_domain()),
            // Token rules were turned into literals by the resolver.
            (DomainKind::Parser, DomainKind::Lexer) => {
                Err(CompileError::NoTokenType(name.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn check_empty_complement(&mut self, transition: &CompiledSetTransition, block: &Block) {
        if !transition.is_negated() || !transition.admissible().is_empty() {
            return;
        }
        let named = SetDisplay::new(transition.set(), self.domain.kind())
            .vocabulary(self.grammar.vocabulary())
            .to_string();
        self.diagnostics
            .report(DiagnosticKind::EmptyComplement, block.span)
            .message(format!("~{named}"))
            .rule(&self.rule.name)
            .emit();
    }

    fn report(&mut self, err: &CompileError, block: &Block) {
        self.diagnostics
            .report(err.kind(), block.span)
            .message(err.detail())
            .rule(&self.rule.name)
            .emit();
    }
}
