//! Setfold compiler: collapses single-symbol alternations into set tests.
//!
//! # Example
//!
//! ```
//! use setfold_compiler::{Block, Element, Grammar, GrammarCompiler};
//!
//! let mut grammar = Grammar::new("T");
//! grammar.token("A", Block::of(Element::class("AaBb")));
//!
//! let compiled = GrammarCompiler::new(&grammar).compile().expect("valid grammar");
//! assert_eq!(compiled.dump(), "A : {'A'..'B', 'a'..'b'}\n");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod ast;
pub mod build;
pub mod compile;
pub mod diagnostics;
mod dump;
pub mod ir;
pub mod options;
pub mod resolve;

#[cfg(test)]
mod build_tests;
#[cfg(test)]
pub(crate) mod test_utils;

pub use analyze::{Analysis, Collapsible, FallbackReason, SetSource, analyze};
pub use ast::{AlternativeElement, AlternativeElement as Element, Block, Grammar, LexerCommand, Rule};
pub use compile::{CompileError, GrammarCompiler};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use ir::{
    BranchBlock, CompiledAlternative, CompiledBlock, CompiledElement, CompiledGrammar,
    CompiledRule, CompiledSetTransition,
};
pub use options::CompileOptions;

/// Errors that can occur during grammar compilation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("grammar compilation failed with {} errors", .0.error_count())]
    GrammarCompileError(Diagnostics),
}

/// Result type for grammar compilation.
pub type Result<T> = std::result::Result<T, Error>;
