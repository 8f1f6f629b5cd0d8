//! Recognition engine for compiled grammars.
//!
//! The [`Lexer`] turns text into tokens and the [`Parser`] recognizes token
//! streams. Both drive the same recognizer over a [`SymbolStream`], so set
//! tests, quantifier loops and ordered branches behave identically in the
//! two domains.

mod cursor;
mod error;
mod lexer;
mod listener;
mod matcher;
mod parser;
mod recognizer;
mod trace;
mod value;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod matcher_tests;
#[cfg(test)]
mod test_utils;

pub use cursor::{CharStream, EOF, Position, SymbolStream, Token, TokenStream};
pub use error::{RecognitionError, RecognitionErrorKind, RuntimeError};
pub use lexer::{Lexer, LexerBuilder};
pub use listener::{ConsoleErrorListener, ErrorCollector, ErrorListener};
pub use matcher::{LoopState, MatchOutcome, SetLoop, SetMatcher};
pub use parser::{ParseOutcome, Parser, ParserBuilder};
pub use recognizer::FuelLimits;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use value::{Binding, BoundValue};
