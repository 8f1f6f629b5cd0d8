//! Token vocabulary: display names for token types.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::Symbol;

/// Names attached to one token type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TokenNames {
    /// Quoted literal, e.g. `'x'`.
    literal: Option<String>,
    /// Rule name, e.g. `ID`.
    symbolic: Option<String>,
}

/// Maps token types to literal and symbolic names.
///
/// Token type 0 is unused; the first defined type is 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    names: IndexMap<Symbol, TokenNames>,
    by_name: IndexMap<String, Symbol>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register names for `token_type`. Later calls add to earlier ones.
    pub fn define(&mut self, token_type: Symbol, literal: Option<&str>, symbolic: Option<&str>) {
        let entry = self.names.entry(token_type).or_default();
        if let Some(literal) = literal {
            entry.literal = Some(literal.to_string());
            self.by_name.insert(literal.to_string(), token_type);
        }
        if let Some(symbolic) = symbolic {
            entry.symbolic = Some(symbolic.to_string());
            self.by_name.insert(symbolic.to_string(), token_type);
        }
    }

    /// Next unused token type.
    pub fn next_token_type(&self) -> Symbol {
        self.max_token_type() + 1
    }

    /// Highest defined token type, 0 when empty.
    pub fn max_token_type(&self) -> Symbol {
        self.names.keys().copied().max().unwrap_or(0)
    }

    pub fn literal_name(&self, token_type: Symbol) -> Option<&str> {
        self.names.get(&token_type)?.literal.as_deref()
    }

    pub fn symbolic_name(&self, token_type: Symbol) -> Option<&str> {
        self.names.get(&token_type)?.symbolic.as_deref()
    }

    /// Literal name if present, else symbolic name, else the number.
    pub fn display_name(&self, token_type: Symbol) -> Cow<'_, str> {
        if let Some(literal) = self.literal_name(token_type) {
            return Cow::Borrowed(literal);
        }
        if let Some(symbolic) = self.symbolic_name(token_type) {
            return Cow::Borrowed(symbolic);
        }
        Cow::Owned(token_type.to_string())
    }

    /// Look up a token type by symbolic name or quoted literal.
    pub fn token_type(&self, name: &str) -> Option<Symbol> {
        self.by_name.get(name).copied()
    }

    /// Parse a `.tokens` listing: one `NAME=type` or `'literal'=type` per line.
    ///
    /// Malformed lines are skipped.
    pub fn parse_tokens(listing: &str) -> Self {
        let mut vocabulary = Self::new();
        for line in listing.lines() {
            let line = line.trim();
            let Some((name, value)) = line.rsplit_once('=') else {
                continue;
            };
            let Ok(token_type) = value.trim().parse::<Symbol>() else {
                continue;
            };
            if name.len() >= 2 && name.starts_with('\'') && name.ends_with('\'') {
                vocabulary.define(token_type, Some(name), None);
            } else if !name.is_empty() {
                vocabulary.define(token_type, None, Some(name));
            }
        }
        vocabulary
    }
}
