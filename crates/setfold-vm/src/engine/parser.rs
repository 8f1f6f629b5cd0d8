//! Parser driver: runs a start rule over a token stream.

use serde::Serialize;

use setfold_compiler::CompiledGrammar;
use setfold_core::DomainKind;

use super::cursor::{SymbolStream, Token, TokenStream};
use super::error::{RecognitionError, RuntimeError};
use super::listener::ErrorListener;
use super::recognizer::{FuelLimits, Recognizer};
use super::trace::{NoopTracer, Tracer};
use super::value::Binding;

/// Result of one parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    pub rule: String,
    pub matched: bool,
    /// Tokens consumed from the start of the stream.
    pub consumed: usize,
    /// Text of the consumed tokens.
    pub text: String,
    pub bindings: Vec<Binding>,
    /// Errors reported to the listener, in order.
    pub errors: Vec<RecognitionError>,
}

impl ParseOutcome {
    /// Last value bound to `label`, in any rule.
    pub fn binding(&self, label: &str) -> Option<&Binding> {
        self.bindings.iter().rev().find(|b| b.label == label)
    }

    /// Matched without reporting anything.
    pub fn is_clean(&self) -> bool {
        self.matched && self.errors.is_empty()
    }
}

/// Parser over one compiled grammar. Reusable across inputs.
#[derive(Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g CompiledGrammar,
    limits: FuelLimits,
}

/// Builder for [`Parser`] instances.
pub struct ParserBuilder<'g> {
    grammar: &'g CompiledGrammar,
    limits: FuelLimits,
}

impl<'g> ParserBuilder<'g> {
    pub fn new(grammar: &'g CompiledGrammar) -> Self {
        Self {
            grammar,
            limits: FuelLimits::default(),
        }
    }

    /// Set the fuel limits.
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution fuel limit for one `parse` call.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    pub fn build(self) -> Parser<'g> {
        Parser {
            grammar: self.grammar,
            limits: self.limits,
        }
    }
}

impl<'g> Parser<'g> {
    /// Create a parser builder.
    pub fn builder(grammar: &'g CompiledGrammar) -> ParserBuilder<'g> {
        ParserBuilder::new(grammar)
    }

    /// Parser with default limits.
    pub fn new(grammar: &'g CompiledGrammar) -> Self {
        Self::builder(grammar).build()
    }

    /// Recognize `tokens` with the parser rule `rule`.
    ///
    /// Recognition errors go to `listener` once the rule returns; only
    /// runtime limits and unknown rules fail the call.
    pub fn parse(
        &self,
        rule: &str,
        tokens: &[Token],
        listener: &mut dyn ErrorListener,
    ) -> Result<ParseOutcome, RuntimeError> {
        self.parse_with(rule, tokens, listener, &mut NoopTracer)
    }

    /// Parse with a tracer for debugging.
    pub fn parse_with<T: Tracer>(
        &self,
        rule: &str,
        tokens: &[Token],
        listener: &mut dyn ErrorListener,
        tracer: &mut T,
    ) -> Result<ParseOutcome, RuntimeError> {
        let start = self
            .grammar
            .rule(rule)
            .ok_or_else(|| RuntimeError::UnknownRule(rule.to_string()))?;

        let mut stream = TokenStream::new(tokens.to_vec());
        let mut recognizer = Recognizer::new(
            self.grammar,
            DomainKind::Parser,
            &mut stream,
            tracer,
            self.limits,
        );
        let matched = recognizer.match_rule(start)?;
        let bindings = recognizer.take_bindings();
        let errors = recognizer.take_errors();

        for error in &errors {
            listener.syntax_error(error);
        }

        let consumed = stream.index();
        Ok(ParseOutcome {
            rule: start.name.clone(),
            matched,
            consumed,
            text: stream.text(0, consumed),
            bindings,
            errors,
        })
    }
}
