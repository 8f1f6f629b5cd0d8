//! Label bindings produced while recognizing.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use super::cursor::Token;

/// What a label captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundValue {
    /// One character matched by a lexer rule.
    Char(char),
    /// One token matched by a parser rule.
    Token(Token),
    /// Text of a labeled block that matched more than one symbol.
    Text(String),
}

impl BoundValue {
    /// Source text of the captured value.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Char(c) => Cow::Owned(c.to_string()),
            Self::Token(t) => Cow::Borrowed(&t.text),
            Self::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(t) => f.write_str(&t.display_text()),
            _ => f.write_str(&setfold_core::escape_display(&self.text())),
        }
    }
}

/// A label assignment made by one rule invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub rule: String,
    pub label: String,
    pub value: BoundValue,
}

impl Binding {
    pub fn new(rule: impl Into<String>, label: impl Into<String>, value: BoundValue) -> Self {
        Self {
            rule: rule.into(),
            label: label.into(),
            value,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} = {}", self.rule, self.label, self.value)
    }
}
