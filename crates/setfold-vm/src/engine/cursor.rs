//! Input streams the recognizer reads symbols from.
//!
//! Characters feed lexer rules, tokens feed parser rules. Both expose the
//! same [`SymbolStream`] interface so the recognizer never cares which
//! domain it runs in.

use std::fmt;

use serde::Serialize;

use setfold_core::{Symbol, escape_display};

use super::value::{Binding, BoundValue};

/// Token type of the end-of-input token. No domain contains it.
pub const EOF: Symbol = 0;

/// Location in the source text: 1-based line, 0-based column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Sequential access to the symbols of one input.
///
/// Indices are stream positions; saving `index()` and passing it to `seek`
/// later restores the stream exactly.
pub trait SymbolStream {
    fn index(&self) -> usize;

    fn seek(&mut self, index: usize);

    /// Symbol `offset` positions ahead (1 is the next one). `None` at end of input.
    fn la(&self, offset: usize) -> Option<Symbol>;

    /// Advance past the next symbol. Does nothing at end of input.
    fn consume(&mut self);

    /// Value a label receives for the symbol at `index`.
    fn value_at(&self, index: usize) -> BoundValue;

    /// Source text of the symbols in `start..stop`.
    fn text(&self, start: usize, stop: usize) -> String;

    /// Symbol at `index` as error messages show it, unquoted.
    fn display_at(&self, index: usize) -> String;

    fn position_at(&self, index: usize) -> Position;
}

/// Characters of a source text.
#[derive(Debug, Clone)]
pub struct CharStream {
    chars: Vec<char>,
    /// One entry per character, plus the end-of-input position.
    positions: Vec<Position>,
    index: usize,
}

impl CharStream {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let mut positions = Vec::with_capacity(chars.len() + 1);
        let mut position = Position::default();
        for &c in &chars {
            positions.push(position);
            if c == '\n' {
                position = Position::new(position.line + 1, 0);
            } else {
                position.column += 1;
            }
        }
        positions.push(position);

        Self {
            chars,
            positions,
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl SymbolStream for CharStream {
    fn index(&self) -> usize {
        self.index
    }

    fn seek(&mut self, index: usize) {
        self.index = index.min(self.chars.len());
    }

    #[inline]
    fn la(&self, offset: usize) -> Option<Symbol> {
        debug_assert!(offset >= 1, "lookahead offsets start at 1");
        self.chars
            .get(self.index + offset - 1)
            .map(|&c| c as Symbol)
    }

    fn consume(&mut self) {
        if self.index < self.chars.len() {
            self.index += 1;
        }
    }

    fn value_at(&self, index: usize) -> BoundValue {
        match self.chars.get(index) {
            Some(&c) => BoundValue::Char(c),
            None => BoundValue::Text(String::new()),
        }
    }

    fn text(&self, start: usize, stop: usize) -> String {
        let stop = stop.min(self.chars.len());
        if start >= stop {
            return String::new();
        }
        self.chars[start..stop].iter().collect()
    }

    fn display_at(&self, index: usize) -> String {
        match self.chars.get(index) {
            Some(c) => escape_display(c.encode_utf8(&mut [0; 4])),
            None => "<EOF>".to_string(),
        }
    }

    fn position_at(&self, index: usize) -> Position {
        self.positions[index.min(self.chars.len())]
    }
}

/// A lexed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub token_type: Symbol,
    pub text: String,
    pub position: Position,
    /// Character offsets `start..stop` in the lexed input.
    pub start: usize,
    pub stop: usize,
    /// Labels bound while the lexer rule matched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<Binding>,
}

impl Token {
    pub fn new(token_type: Symbol, text: impl Into<String>, position: Position) -> Self {
        Self {
            token_type,
            text: text.into(),
            position,
            start: 0,
            stop: 0,
            bindings: Vec::new(),
        }
    }

    /// End-of-input token at character `offset`.
    pub fn eof(position: Position, offset: usize) -> Self {
        Self {
            token_type: EOF,
            text: String::new(),
            position,
            start: offset,
            stop: offset,
            bindings: Vec::new(),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == EOF
    }

    /// Text as error messages show it: escaped, `<EOF>` for end of input.
    pub fn display_text(&self) -> String {
        if self.is_eof() {
            "<EOF>".to_string()
        } else {
            escape_display(&self.text)
        }
    }
}

/// Tokens fed to parser rules. Always ends with an EOF token.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenStream {
    /// Wrap `tokens`, appending an EOF token if the last one is not.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let eof = match tokens.last() {
                Some(last) => {
                    let width = last.text.chars().count() as u32;
                    let position = Position::new(last.position.line, last.position.column + width);
                    Token::eof(position, last.stop)
                }
                None => Token::eof(Position::default(), 0),
            };
            tokens.push(eof);
        }
        Self { tokens, index: 0 }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at `index`; indices past the end yield the EOF token.
    pub fn get(&self, index: usize) -> &Token {
        &self.tokens[index.min(self.tokens.len() - 1)]
    }
}

impl SymbolStream for TokenStream {
    fn index(&self) -> usize {
        self.index
    }

    fn seek(&mut self, index: usize) {
        self.index = index.min(self.tokens.len() - 1);
    }

    #[inline]
    fn la(&self, offset: usize) -> Option<Symbol> {
        debug_assert!(offset >= 1, "lookahead offsets start at 1");
        let token = self.get(self.index + offset - 1);
        (!token.is_eof()).then_some(token.token_type)
    }

    fn consume(&mut self) {
        if !self.get(self.index).is_eof() {
            self.index += 1;
        }
    }

    fn value_at(&self, index: usize) -> BoundValue {
        BoundValue::Token(self.get(index).clone())
    }

    fn text(&self, start: usize, stop: usize) -> String {
        let stop = stop.min(self.tokens.len());
        if start >= stop {
            return String::new();
        }
        self.tokens[start..stop]
            .iter()
            .filter(|t| !t.is_eof())
            .map(|t| t.text.as_str())
            .collect()
    }

    fn display_at(&self, index: usize) -> String {
        self.get(index).display_text()
    }

    fn position_at(&self, index: usize) -> Position {
        self.get(index).position
    }
}
