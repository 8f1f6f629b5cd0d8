//! Compiler configuration.

/// Switches for the grammar compiler.
///
/// Defaults enable every optimization; turning one off yields the plain
/// branching form, which must accept exactly the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Collapse single-symbol alternations into set transitions.
    pub collapse_sets: bool,
    /// Inline lexer rule references that match exactly one symbol.
    pub resolve_fragments: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            collapse_sets: true,
            resolve_fragments: true,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collapse_sets(mut self, value: bool) -> Self {
        self.collapse_sets = value;
        self
    }

    pub fn resolve_fragments(mut self, value: bool) -> Self {
        self.resolve_fragments = value;
        self
    }

    /// No optimizations: every alternation stays a branch.
    pub fn unoptimized() -> Self {
        Self {
            collapse_sets: false,
            resolve_fragments: false,
        }
    }
}
