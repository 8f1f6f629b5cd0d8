//! Human-readable set rendering for runtime messages and dumps.
//!
//! The format is a contract other tooling parses, so it stays fixed:
//! - one member prints bare: `'x'`
//! - several members print braced and comma-separated: `{'x', 'y'}`
//! - the empty set prints `{}`
//! - character ranges print as `'a'..'z'`; token ranges are enumerated

use std::fmt::{self, Write};

use crate::{DomainKind, Symbol, SymbolSet, Vocabulary};

/// Display adapter for a [`SymbolSet`] in a given domain.
pub struct SetDisplay<'a> {
    set: &'a SymbolSet,
    kind: DomainKind,
    vocabulary: Option<&'a Vocabulary>,
}

impl<'a> SetDisplay<'a> {
    pub fn new(set: &'a SymbolSet, kind: DomainKind) -> Self {
        Self {
            set,
            kind,
            vocabulary: None,
        }
    }

    /// Token names for parser-domain sets.
    pub fn vocabulary(mut self, vocabulary: &'a Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    fn write_token(&self, f: &mut fmt::Formatter<'_>, token_type: Symbol) -> fmt::Result {
        match self.vocabulary {
            Some(v) => f.write_str(&v.display_name(token_type)),
            None => write!(f, "{token_type}"),
        }
    }
}

impl fmt::Display for SetDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.set.is_empty() {
            return f.write_str("{}");
        }

        let braced = self.set.len() > 1;
        if braced {
            f.write_char('{')?;
        }

        let mut first = true;
        for iv in self.set.intervals() {
            match self.kind {
                DomainKind::Lexer => {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write_char_literal(f, iv.low())?;
                    if !iv.is_single() {
                        f.write_str("..")?;
                        write_char_literal(f, iv.high())?;
                    }
                }
                DomainKind::Parser => {
                    for token_type in iv.low()..=iv.high() {
                        if !first {
                            f.write_str(", ")?;
                        }
                        first = false;
                        self.write_token(f, token_type)?;
                    }
                }
            }
        }

        if braced {
            f.write_char('}')?;
        }
        Ok(())
    }
}

fn write_char_literal(f: &mut fmt::Formatter<'_>, code_point: Symbol) -> fmt::Result {
    f.write_char('\'')?;
    match char::from_u32(code_point) {
        Some(c) => f.write_str(&escape_display(c.encode_utf8(&mut [0; 4]))),
        None => write!(f, "\\u{{{code_point:x}}}"),
    }?;
    f.write_char('\'')
}

/// Escape line breaks and tabs the way error messages show them.
pub fn escape_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
