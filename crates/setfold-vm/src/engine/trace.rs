//! Tracing infrastructure for debugging recognition.
//!
//! The recognizer is generic over [`Tracer`]. With [`NoopTracer`] every hook
//! is an empty `#[inline(always)]` function and the calls compile away;
//! [`PrintTracer`] collects one line per event for inspection.

use std::borrow::Cow;

use setfold_compiler::CompiledGrammar;
use setfold_core::{DomainKind, SetDisplay, Symbol, SymbolSet, Vocabulary};

use super::cursor::Token;
use super::value::BoundValue;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Rules, branches, backtracking and produced tokens.
    #[default]
    Default,
    /// Adds every set test, binding and loop exit.
    Verbose,
    /// Adds raw symbol values to set tests.
    VeryVerbose,
}

/// Recognizer instrumentation hooks.
///
/// Hooks receive raw data; formatting happens in the implementation.
pub trait Tracer {
    /// Called when a rule invocation starts.
    fn trace_enter_rule(&mut self, rule: &str);

    /// Called when a rule invocation ends.
    fn trace_exit_rule(&mut self, rule: &str, matched: bool);

    /// Called after a set test accepts `symbol`.
    fn trace_match(&mut self, symbol: Symbol, kind: DomainKind);

    /// Called after a set test rejects `symbol` (`None` at end of input).
    fn trace_match_failure(&mut self, symbol: Option<Symbol>, kind: DomainKind);

    /// Called when a label captures a value.
    fn trace_bind(&mut self, label: &str, value: &BoundValue);

    /// Called when a repeating set loop stops after `matches` iterations.
    fn trace_loop_exit(&mut self, matches: usize);

    /// Called before trying alternative `alternative` of a branch block.
    fn trace_branch(&mut self, alternative: usize);

    /// Called when a failed alternative is undone.
    fn trace_backtrack(&mut self);

    /// Called when the lexer emits a token.
    fn trace_token(&mut self, token: &Token);

    /// Called when the lexer drops text matched by a skip rule.
    fn trace_skip(&mut self, rule: &str, text: &str);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter_rule(&mut self, _rule: &str) {}

    #[inline(always)]
    fn trace_exit_rule(&mut self, _rule: &str, _matched: bool) {}

    #[inline(always)]
    fn trace_match(&mut self, _symbol: Symbol, _kind: DomainKind) {}

    #[inline(always)]
    fn trace_match_failure(&mut self, _symbol: Option<Symbol>, _kind: DomainKind) {}

    #[inline(always)]
    fn trace_bind(&mut self, _label: &str, _value: &BoundValue) {}

    #[inline(always)]
    fn trace_loop_exit(&mut self, _matches: usize) {}

    #[inline(always)]
    fn trace_branch(&mut self, _alternative: usize) {}

    #[inline(always)]
    fn trace_backtrack(&mut self) {}

    #[inline(always)]
    fn trace_token(&mut self, _token: &Token) {}

    #[inline(always)]
    fn trace_skip(&mut self, _rule: &str, _text: &str) {}
}

/// Tracer that collects an indented execution log.
pub struct PrintTracer<'g> {
    vocabulary: &'g Vocabulary,
    verbosity: Verbosity,
    lines: Vec<String>,
    /// Nesting of rule invocations, for indentation.
    depth: usize,
}

impl<'g> PrintTracer<'g> {
    pub fn new(grammar: &'g CompiledGrammar, verbosity: Verbosity) -> Self {
        Self {
            vocabulary: grammar.vocabulary(),
            verbosity,
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Collected lines joined with newlines.
    pub fn dump(&self) -> String {
        self.lines.join("\n")
    }

    /// Print all buffered lines to stdout.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn push(&mut self, tag: &str, content: &str) {
        let indent = self.depth * 2;
        let line = if content.is_empty() {
            format!("{:indent$}{tag}", "")
        } else {
            format!("{:indent$}{tag} {content}", "")
        };
        self.lines.push(line);
    }

    fn verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    fn format_symbol(&self, symbol: Option<Symbol>, kind: DomainKind) -> String {
        let Some(symbol) = symbol else {
            return "<EOF>".to_string();
        };
        let set = SymbolSet::single(symbol);
        let shown = SetDisplay::new(&set, kind)
            .vocabulary(self.vocabulary)
            .to_string();
        if self.verbosity == Verbosity::VeryVerbose {
            format!("{shown} ({symbol})")
        } else {
            shown
        }
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter_rule(&mut self, rule: &str) {
        self.push("enter", rule);
        self.depth += 1;
    }

    fn trace_exit_rule(&mut self, rule: &str, matched: bool) {
        self.depth = self.depth.saturating_sub(1);
        if matched {
            self.push("exit", rule);
        } else {
            self.push("exit", &format!("{rule} (failed)"));
        }
    }

    fn trace_match(&mut self, symbol: Symbol, kind: DomainKind) {
        if self.verbose() {
            let content = self.format_symbol(Some(symbol), kind);
            self.push("match", &content);
        }
    }

    fn trace_match_failure(&mut self, symbol: Option<Symbol>, kind: DomainKind) {
        if self.verbose() {
            let content = self.format_symbol(symbol, kind);
            self.push("fail", &content);
        }
    }

    fn trace_bind(&mut self, label: &str, value: &BoundValue) {
        if self.verbose() {
            self.push("bind", &format!("{label} = {value}"));
        }
    }

    fn trace_loop_exit(&mut self, matches: usize) {
        if self.verbose() {
            self.push("loop-exit", &matches.to_string());
        }
    }

    fn trace_branch(&mut self, alternative: usize) {
        self.push("branch", &alternative.to_string());
    }

    fn trace_backtrack(&mut self) {
        self.push("backtrack", "");
    }

    fn trace_token(&mut self, token: &Token) {
        let name = if token.is_eof() {
            Cow::Borrowed("EOF")
        } else {
            self.vocabulary.display_name(token.token_type)
        };
        let content = format!("{name} '{}' {}", token.display_text(), token.position);
        self.push("token", &content);
    }

    fn trace_skip(&mut self, rule: &str, text: &str) {
        let content = format!("{rule} '{}'", setfold_core::escape_display(text));
        self.push("skip", &content);
    }
}
