//! Grammar AST: the input boundary of the compiler.
//!
//! A front end (grammar parser, test helper, code generator) builds a
//! [`Grammar`] out of rules whose bodies are [`Block`]s of
//! [`AlternativeElement`]s. Lexer bodies use code points as symbols, parser
//! bodies use token types.

use indexmap::IndexMap;
use rowan::TextRange;
use serde::Serialize;

use setfold_core::{Domain, DomainKind, Quantifier, Symbol, SymbolSet, Vocabulary};

/// Command attached to a lexer rule with `-> command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LexerCommand {
    /// Match and discard.
    Skip,
}

/// One alternative (or part of one) of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlternativeElement {
    /// Exactly one symbol: a character in lexer rules, a token type in parser rules.
    SingleLiteral(Symbol),
    /// A character class such as `[a-z]`. Lexer rules only.
    Class(SymbolSet),
    /// Two or more consecutive elements.
    Sequence(Vec<AlternativeElement>),
    /// Call of another rule by name.
    RuleReference(String),
    /// `~x`: any symbol of the domain except what `x` matches.
    Negated(Box<AlternativeElement>),
    /// Parenthesized sub-block, possibly quantified or labeled.
    Block(Box<Block>),
}

impl AlternativeElement {
    /// Single character.
    pub fn ch(c: char) -> Self {
        Self::SingleLiteral(c as Symbol)
    }

    /// Single token type.
    pub fn token(token_type: Symbol) -> Self {
        Self::SingleLiteral(token_type)
    }

    /// Lexer string literal: one character stays single, longer text becomes a sequence.
    pub fn text(text: &str) -> Self {
        Self::seq(text.chars().map(Self::ch).collect())
    }

    /// Character class from its members, e.g. `class("AaBb")` for `[AaBb]`.
    pub fn class(chars: &str) -> Self {
        Self::Class(SymbolSet::from_chars(chars))
    }

    /// Character range class `[lo-hi]`. Reversed bounds give an empty class.
    pub fn range(lo: char, hi: char) -> Self {
        Self::Class(SymbolSet::range(lo as Symbol, hi as Symbol).unwrap_or_default())
    }

    /// Sequence of elements; nested sequences are flattened and a single
    /// element stands for itself.
    pub fn seq(elements: Vec<AlternativeElement>) -> Self {
        let mut flat = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                Self::Sequence(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            1 => flat.remove(0),
            _ => Self::Sequence(flat),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::RuleReference(name.into())
    }

    pub fn not(inner: AlternativeElement) -> Self {
        Self::Negated(Box::new(inner))
    }

    pub fn block(block: Block) -> Self {
        Self::Block(Box::new(block))
    }

    /// Whether the element always matches exactly one symbol.
    pub fn is_single_symbol(&self) -> bool {
        match self {
            Self::SingleLiteral(_) | Self::Class(_) | Self::Negated(_) => true,
            Self::Block(b) => b.is_plain() && b.alternatives.iter().all(Self::is_single_symbol),
            Self::Sequence(_) | Self::RuleReference(_) => false,
        }
    }
}

/// A parenthesized list of alternatives with an optional quantifier and label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub alternatives: Vec<AlternativeElement>,
    pub quantifier: Quantifier,
    /// `t=(...)`: binds the matched symbol.
    pub label: Option<String>,
    pub span: TextRange,
}

impl Block {
    pub fn new(alternatives: Vec<AlternativeElement>) -> Self {
        Self {
            alternatives,
            quantifier: Quantifier::None,
            label: None,
            span: TextRange::default(),
        }
    }

    /// Block with a single alternative.
    pub fn of(element: AlternativeElement) -> Self {
        Self::new(vec![element])
    }

    pub fn quantified(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    pub fn optional(self) -> Self {
        self.quantified(Quantifier::Optional)
    }

    pub fn star(self) -> Self {
        self.quantified(Quantifier::Star)
    }

    pub fn plus(self) -> Self {
        self.quantified(Quantifier::Plus)
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn span(mut self, span: TextRange) -> Self {
        self.span = span;
        self
    }

    /// Neither quantified nor labeled: a nested plain block is just grouping.
    pub fn is_plain(&self) -> bool {
        self.quantifier == Quantifier::None && self.label.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub kind: DomainKind,
    /// Lexer fragments produce no tokens of their own.
    pub fragment: bool,
    pub command: Option<LexerCommand>,
    /// Token type produced by a non-fragment lexer rule.
    pub token_type: Option<Symbol>,
    pub body: Block,
    pub span: TextRange,
}

impl Rule {
    pub fn new(name: impl Into<String>, kind: DomainKind, body: Block) -> Self {
        let span = body.span;
        Self {
            name: name.into(),
            kind,
            fragment: false,
            command: None,
            token_type: None,
            body,
            span,
        }
    }

    pub fn is_lexer(&self) -> bool {
        self.kind == DomainKind::Lexer
    }

    /// Whether lexing emits a token for this rule.
    pub fn produces_token(&self) -> bool {
        self.is_lexer() && !self.fragment && self.command.is_none()
    }
}

/// A named collection of lexer and parser rules plus the token vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    name: String,
    rules: IndexMap<String, Rule>,
    vocabulary: Vocabulary,
    implicit_tokens: u32,
}

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Rules in definition order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The symbol domain for rules of `kind`.
    ///
    /// The parser domain spans every token type defined so far.
    pub fn domain(&self, kind: DomainKind) -> Domain {
        match kind {
            DomainKind::Lexer => Domain::lexer(),
            DomainKind::Parser => Domain::parser(self.vocabulary.max_token_type()),
        }
    }

    /// Insert a rule as-is. A rule with the same name is replaced.
    pub fn add_rule(&mut self, rule: Rule) {
        if let Some(token_type) = rule.token_type {
            self.vocabulary.define(token_type, None, Some(&rule.name));
        }
        self.rules.insert(rule.name.clone(), rule);
    }

    /// Define a token rule and return its token type.
    pub fn token(&mut self, name: &str, body: Block) -> Symbol {
        let token_type = self.vocabulary.next_token_type();
        let mut rule = Rule::new(name, DomainKind::Lexer, body);
        rule.token_type = Some(token_type);
        self.add_rule(rule);
        token_type
    }

    /// Token type for a quoted literal such as `'x'`, defining an implicit
    /// `T__n` token rule on first use.
    pub fn literal_token(&mut self, text: &str) -> Symbol {
        let quoted = format!("'{text}'");
        if let Some(token_type) = self.vocabulary.token_type(&quoted) {
            return token_type;
        }
        let name = format!("T__{}", self.implicit_tokens);
        self.implicit_tokens += 1;
        let token_type = self.token(&name, Block::of(AlternativeElement::text(text)));
        self.vocabulary.define(token_type, Some(&quoted), None);
        token_type
    }

    pub fn fragment(&mut self, name: &str, body: Block) {
        let mut rule = Rule::new(name, DomainKind::Lexer, body);
        rule.fragment = true;
        self.add_rule(rule);
    }

    /// Lexer rule whose matches are discarded (`-> skip`).
    pub fn skip(&mut self, name: &str, body: Block) {
        let mut rule = Rule::new(name, DomainKind::Lexer, body);
        rule.command = Some(LexerCommand::Skip);
        self.add_rule(rule);
    }

    pub fn parser_rule(&mut self, name: &str, body: Block) {
        self.add_rule(Rule::new(name, DomainKind::Parser, body));
    }
}
