//! Alternative-set analysis.
//!
//! Decides whether one block's alternatives can be matched by a single set
//! test. The analysis is pure: it sees only the alternatives and the domain,
//! never other rules. Rule references that name single-symbol fragments are
//! inlined by [`crate::resolve`] before this runs.

use serde::Serialize;

use setfold_core::{Domain, DomainKind, Symbol, SymbolSet};

use crate::ast::AlternativeElement;
use crate::compile::CompileError;

/// One single-symbol alternative feeding a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetSource {
    Literal(Symbol),
    Class(SymbolSet),
}

/// Alternatives that collapse into one set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapsible {
    sources: Vec<SetSource>,
    negated: bool,
}

impl Collapsible {
    pub fn sources(&self) -> &[SetSource] {
        &self.sources
    }

    /// Whether every alternative was written as `~x`.
    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

/// Why a block keeps its branches.
///
/// Ordered by priority: when several alternatives disqualify a block for
/// different reasons, the smallest variant is reported, so the verdict does
/// not depend on alternative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    InvalidNegation,
    InconsistentDomain,
    /// An alternative matches zero or several symbols.
    MultiSymbol,
    RuleReference,
    /// A quantified or labeled sub-block.
    NestedBlock,
    /// Some alternatives negated, some not.
    MixedNegation,
    /// No alternatives at all.
    Empty,
    /// Collapsing switched off in the compile options.
    Disabled,
}

impl FallbackReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::InvalidNegation => "invalid negation",
            Self::InconsistentDomain => "inconsistent domain",
            Self::MultiSymbol => "multi-symbol alternative",
            Self::RuleReference => "rule reference",
            Self::NestedBlock => "nested block",
            Self::MixedNegation => "mixed negation",
            Self::Empty => "no alternatives",
            Self::Disabled => "collapsing disabled",
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Collapsible(Collapsible),
    NotCollapsible(FallbackReason),
}

impl Analysis {
    pub fn is_collapsible(&self) -> bool {
        matches!(self, Self::Collapsible(_))
    }

    pub fn reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Collapsible(_) => None,
            Self::NotCollapsible(reason) => Some(*reason),
        }
    }
}

/// Decide whether `alternatives` collapse into one set over `domain`.
///
/// Collapses iff every alternative is a single symbol (literal or class) and
/// either none or all of them are negated. Plain nested blocks are treated as
/// grouping and flattened. Duplicates are allowed; order is irrelevant.
pub fn analyze(alternatives: &[AlternativeElement], domain: &Domain) -> Analysis {
    let mut shapes = Shapes::default();
    for alternative in alternatives {
        shapes.classify(alternative, domain);
    }
    shapes.finish()
}

#[derive(Default)]
struct Shapes {
    positive: Vec<SetSource>,
    negative: Vec<SetSource>,
    any_positive: bool,
    any_negative: bool,
    reason: Option<FallbackReason>,
}

impl Shapes {
    fn classify(&mut self, element: &AlternativeElement, domain: &Domain) {
        match element {
            AlternativeElement::Block(block) if block.is_plain() => {
                for alternative in &block.alternatives {
                    self.classify(alternative, domain);
                }
            }
            AlternativeElement::Block(_) => self.reject(FallbackReason::NestedBlock),
            AlternativeElement::Sequence(_) => self.reject(FallbackReason::MultiSymbol),
            AlternativeElement::RuleReference(_) => self.reject(FallbackReason::RuleReference),
            AlternativeElement::Negated(inner) => match negation_sources(inner, domain) {
                Ok(sources) => {
                    self.any_negative = true;
                    self.negative.extend(sources);
                }
                Err(err) => self.reject(reason_for(&err)),
            },
            AlternativeElement::SingleLiteral(_) | AlternativeElement::Class(_) => {
                match single_source(element, domain) {
                    Ok(source) => {
                        self.any_positive = true;
                        self.positive.push(source);
                    }
                    Err(err) => self.reject(reason_for(&err)),
                }
            }
        }
    }

    fn reject(&mut self, reason: FallbackReason) {
        self.reason = Some(self.reason.map_or(reason, |r| r.min(reason)));
    }

    fn finish(self) -> Analysis {
        if let Some(reason) = self.reason {
            return Analysis::NotCollapsible(reason);
        }
        match (self.any_positive, self.any_negative) {
            (false, false) => Analysis::NotCollapsible(FallbackReason::Empty),
            (true, false) => Analysis::Collapsible(Collapsible {
                sources: self.positive,
                negated: false,
            }),
            (false, true) => Analysis::Collapsible(Collapsible {
                sources: self.negative,
                negated: true,
            }),
            (true, true) => Analysis::NotCollapsible(FallbackReason::MixedNegation),
        }
    }
}

pub(crate) fn reason_for(err: &CompileError) -> FallbackReason {
    match err {
        CompileError::InvalidNegationTarget(_) => FallbackReason::InvalidNegation,
        CompileError::UndefinedRule(_) | CompileError::NoTokenType(_) => {
            FallbackReason::RuleReference
        }
        CompileError::OutOfDomain(_)
        | CompileError::ClassOutsideLexer(_)
        | CompileError::CrossDomainReference { .. } => FallbackReason::InconsistentDomain,
    }
}

/// A literal or class, checked against the domain.
pub fn single_source(
    element: &AlternativeElement,
    domain: &Domain,
) -> Result<SetSource, CompileError> {
    match element {
        AlternativeElement::SingleLiteral(symbol) => {
            domain.check(*symbol)?;
            Ok(SetSource::Literal(*symbol))
        }
        AlternativeElement::Class(set) => {
            if domain.kind() != DomainKind::Lexer {
                return Err(CompileError::ClassOutsideLexer(domain.kind()));
            }
            domain.check_set(set)?;
            Ok(SetSource::Class(set.clone()))
        }
        other => Err(CompileError::InvalidNegationTarget(describe(other))),
    }
}

/// Sources named by the operand of `~`.
///
/// The operand must be one symbol or a plain block whose alternatives are
/// each one symbol.
pub fn negation_sources(
    operand: &AlternativeElement,
    domain: &Domain,
) -> Result<Vec<SetSource>, CompileError> {
    match operand {
        AlternativeElement::Block(block) if block.is_plain() => {
            let mut sources = Vec::with_capacity(block.alternatives.len());
            for alternative in &block.alternatives {
                sources.extend(negation_sources(alternative, domain)?);
            }
            Ok(sources)
        }
        other => Ok(vec![single_source(other, domain)?]),
    }
}

/// Validate one alternative on its own, without looking into nested blocks
/// (those are validated when they are compiled).
pub fn check_alternative(element: &AlternativeElement, domain: &Domain) -> Result<(), CompileError> {
    match element {
        AlternativeElement::SingleLiteral(_) | AlternativeElement::Class(_) => {
            single_source(element, domain).map(|_| ())
        }
        AlternativeElement::Sequence(items) => items
            .iter()
            .try_for_each(|item| check_alternative(item, domain)),
        AlternativeElement::Negated(inner) => negation_sources(inner, domain).map(|_| ()),
        AlternativeElement::RuleReference(_) | AlternativeElement::Block(_) => Ok(()),
    }
}

fn describe(element: &AlternativeElement) -> &'static str {
    match element {
        AlternativeElement::SingleLiteral(_) => "a literal",
        AlternativeElement::Class(_) => "a character class",
        AlternativeElement::Sequence(_) => "a sequence",
        AlternativeElement::RuleReference(_) => "a rule that does not match a single symbol",
        AlternativeElement::Negated(_) => "a negation",
        AlternativeElement::Block(_) => "a quantified or labeled block",
    }
}
