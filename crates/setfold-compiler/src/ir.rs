//! Compiled grammar: what the recognizer executes.
//!
//! Everything here is immutable once the compiler returns it and is safe to
//! share across threads running independent parses.

use indexmap::IndexMap;
use serde::Serialize;

use setfold_core::{Domain, DomainKind, Quantifier, SetDisplay, Symbol, SymbolSet, Vocabulary};

use crate::analyze::FallbackReason;
use crate::ast::LexerCommand;
use crate::build::BuiltSet;

/// A collapsed alternation: one set test wrapped in a quantifier loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledSetTransition {
    /// Symbols named by the alternatives, before negation.
    set: SymbolSet,
    negated: bool,
    quantifier: Quantifier,
    label: Option<String>,
    domain: Domain,
    /// Symbols that match: `set`, or its complement within `domain`.
    #[serde(skip)]
    admissible: SymbolSet,
}

impl CompiledSetTransition {
    /// Build a transition; members of `set` outside `domain` are dropped.
    pub fn new(
        set: SymbolSet,
        negated: bool,
        quantifier: Quantifier,
        label: Option<String>,
        domain: Domain,
    ) -> Self {
        let built = BuiltSet::new(set.clamp(&domain), negated, &domain);
        Self::from_built(built, quantifier, label, domain)
    }

    /// Wrap an already built set in `quantifier`.
    pub fn from_built(
        built: BuiltSet,
        quantifier: Quantifier,
        label: Option<String>,
        domain: Domain,
    ) -> Self {
        Self {
            set: built.named,
            negated: built.negated,
            quantifier,
            label,
            domain,
            admissible: built.admissible,
        }
    }

    /// Exactly one symbol from `set`.
    pub fn single(set: SymbolSet, domain: Domain) -> Self {
        Self::new(set, false, Quantifier::None, None, domain)
    }

    pub fn set(&self) -> &SymbolSet {
        &self.set
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Symbols this transition accepts.
    pub fn admissible(&self) -> &SymbolSet {
        &self.admissible
    }

    /// Whether `symbol` passes the set test. End of input (`None`) never does.
    #[inline]
    pub fn matches(&self, symbol: Option<Symbol>) -> bool {
        symbol.is_some_and(|s| self.domain.contains(s) && self.set.contains(s) != self.negated)
    }

    /// Render the accepted symbols for an error message, e.g. `{'x', 'y'}`.
    pub fn expected(&self, vocabulary: &Vocabulary) -> String {
        SetDisplay::new(&self.admissible, self.domain.kind())
            .vocabulary(vocabulary)
            .to_string()
    }
}

/// One alternative: a sequence of elements matched left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CompiledAlternative {
    pub elements: Vec<CompiledElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompiledElement {
    Set(CompiledSetTransition),
    /// Invoke another rule.
    Call { rule: String },
    Block(CompiledBlock),
}

/// Alternatives kept as ordered branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchBlock {
    pub alternatives: Vec<CompiledAlternative>,
    pub quantifier: Quantifier,
    /// Only kept when the block would have collapsed; binds the matched text.
    pub label: Option<String>,
    pub reason: FallbackReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompiledBlock {
    Set(CompiledSetTransition),
    Branches(BranchBlock),
}

impl CompiledBlock {
    pub fn quantifier(&self) -> Quantifier {
        match self {
            Self::Set(t) => t.quantifier(),
            Self::Branches(b) => b.quantifier,
        }
    }

    /// The collapsed transition, if this block was collapsed.
    pub fn as_set(&self) -> Option<&CompiledSetTransition> {
        match self {
            Self::Set(t) => Some(t),
            Self::Branches(_) => None,
        }
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Set(_) => None,
            Self::Branches(b) => Some(b.reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledRule {
    pub name: String,
    pub kind: DomainKind,
    pub fragment: bool,
    pub command: Option<LexerCommand>,
    pub token_type: Option<Symbol>,
    pub body: CompiledBlock,
}

impl CompiledRule {
    /// Lexer rule that the tokenizer tries at each position.
    pub fn is_token_rule(&self) -> bool {
        self.kind == DomainKind::Lexer && !self.fragment
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompiledGrammar {
    pub(crate) name: String,
    pub(crate) lexer_domain: Domain,
    pub(crate) parser_domain: Domain,
    #[serde(skip)]
    pub(crate) vocabulary: Vocabulary,
    pub(crate) rules: IndexMap<String, CompiledRule>,
}

impl CompiledGrammar {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.get(name)
    }

    /// Rules in definition order.
    pub fn rules(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.values()
    }

    /// Lexer rules tried when tokenizing, in priority order.
    pub fn token_rules(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.values().filter(|r| r.is_token_rule())
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn domain(&self, kind: DomainKind) -> &Domain {
        match kind {
            DomainKind::Lexer => &self.lexer_domain,
            DomainKind::Parser => &self.parser_domain,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
