//! Runtime for compiled setfold grammars.
//!
//! This crate tokenizes text and recognizes token streams with the rules of a
//! [`CompiledGrammar`](setfold_compiler::CompiledGrammar). Collapsed
//! alternations run as single set tests; everything else runs as ordered
//! branches with backtracking.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Binding, BoundValue, CharStream, ConsoleErrorListener, EOF, ErrorCollector, ErrorListener,
    FuelLimits, Lexer, LoopState, MatchOutcome, NoopTracer, ParseOutcome, Parser, Position,
    PrintTracer, RecognitionError, RecognitionErrorKind, RuntimeError, SetLoop, SetMatcher,
    SymbolStream, Token, TokenStream, Tracer, Verbosity,
};
