//! Test utilities.

use crate::{CompileOptions, CompiledGrammar, Diagnostics, Grammar, GrammarCompiler};

impl Grammar {
    #[track_caller]
    pub fn expect_compiled(&self) -> CompiledGrammar {
        match GrammarCompiler::new(self).compile() {
            Ok(compiled) => compiled,
            Err(crate::Error::GrammarCompileError(diagnostics)) => {
                panic!(
                    "expected valid grammar, got:\n{}",
                    diagnostics.printer().render()
                )
            }
        }
    }

    /// Dump of the optimized compilation, trailing newline removed.
    #[track_caller]
    pub fn expect_dump(&self) -> String {
        self.expect_compiled().dump().trim_end().to_string()
    }

    /// Dump with every optimization switched off.
    #[track_caller]
    pub fn expect_unoptimized_dump(&self) -> String {
        let compiled = GrammarCompiler::new(self)
            .options(CompileOptions::unoptimized())
            .compile()
            .expect("expected valid grammar");
        compiled.dump().trim_end().to_string()
    }

    /// Lenient compilation that must report at least one error.
    #[track_caller]
    pub fn expect_invalid(&self) -> (CompiledGrammar, Diagnostics) {
        let (compiled, diagnostics) = GrammarCompiler::new(self).compile_lenient();
        assert!(diagnostics.has_errors(), "expected diagnostics, got none");
        (compiled, diagnostics)
    }
}
