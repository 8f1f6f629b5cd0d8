//! Tokenizer driven by the grammar's lexer rules.
//!
//! At each position every token rule is tried; the longest match wins and
//! the earliest rule breaks ties. Text matched by a `skip` rule is dropped.
//! When nothing matches, a token recognition error is reported and one
//! character is skipped.

use setfold_compiler::{CompiledGrammar, CompiledRule, LexerCommand};
use setfold_core::{DomainKind, escape_display};

use super::cursor::{CharStream, SymbolStream, Token};
use super::error::{RecognitionError, RecognitionErrorKind, RuntimeError};
use super::listener::ErrorListener;
use super::recognizer::{FuelLimits, Recognizer};
use super::trace::{NoopTracer, Tracer};
use super::value::Binding;

/// Lexer over one compiled grammar. Reusable across inputs.
#[derive(Clone, Copy)]
pub struct Lexer<'g> {
    grammar: &'g CompiledGrammar,
    limits: FuelLimits,
}

/// Builder for [`Lexer`] instances.
pub struct LexerBuilder<'g> {
    grammar: &'g CompiledGrammar,
    limits: FuelLimits,
}

impl<'g> LexerBuilder<'g> {
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

    /// Set the execution fuel limit for one `tokenize` call.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    pub fn build(self) -> Lexer<'g> {
        Lexer {
            grammar: self.grammar,
            limits: self.limits,
        }
    }
}

/// Best candidate at one position.
struct Candidate<'g> {
    rule: &'g CompiledRule,
    stop: usize,
    bindings: Vec<Binding>,
}

impl<'g> Lexer<'g> {
    /// Create a lexer builder.
    pub fn builder(grammar: &'g CompiledGrammar) -> LexerBuilder<'g> {
        LexerBuilder::new(grammar)
    }

    /// Lexer with default limits.
    pub fn new(grammar: &'g CompiledGrammar) -> Self {
        Self::builder(grammar).build()
    }

    /// Tokenize `input`. The result always ends with an EOF token.
    pub fn tokenize(
        &self,
        input: &str,
        listener: &mut dyn ErrorListener,
    ) -> Result<Vec<Token>, RuntimeError> {
        self.tokenize_with(input, listener, &mut NoopTracer)
    }

    /// Tokenize with a tracer for debugging.
    pub fn tokenize_with<T: Tracer>(
        &self,
        input: &str,
        listener: &mut dyn ErrorListener,
        tracer: &mut T,
    ) -> Result<Vec<Token>, RuntimeError> {
        let rules: Vec<&'g CompiledRule> = self.grammar.token_rules().collect();
        let mut stream = CharStream::new(input);
        let mut recognizer = Recognizer::new(
            self.grammar,
            DomainKind::Lexer,
            &mut stream,
            tracer,
            self.limits,
        );
        let mut tokens = Vec::new();

        loop {
            let start = recognizer.stream().index();
            let position = recognizer.stream().position_at(start);
            if recognizer.stream().la(1).is_none() {
                let eof = Token::eof(position, start);
                recognizer.tracer().trace_token(&eof);
                tokens.push(eof);
                return Ok(tokens);
            }

            recognizer.reset_furthest(start);
            let mut best: Option<Candidate<'g>> = None;
            for &rule in &rules {
                recognizer.stream_mut().seek(start);
                if !recognizer.match_rule(rule)? {
                    continue;
                }
                let stop = recognizer.stream().index();
                let bindings = recognizer.take_bindings();
                if stop > start && best.as_ref().is_none_or(|b| stop > b.stop) {
                    best = Some(Candidate {
                        rule,
                        stop,
                        bindings,
                    });
                }
            }

            let Some(candidate) = best else {
                // Up to and including the character that stopped the longest attempt
                let stop = recognizer.furthest() + 1;
                let text = recognizer.stream().text(start, stop);
                let kind = RecognitionErrorKind::TokenRecognition {
                    text: escape_display(&text),
                };
                listener.syntax_error(&RecognitionError::new(kind, position));
                // Resume past the character that stopped the attempt
                let stream = recognizer.stream_mut();
                stream.seek(stop - 1);
                stream.consume();
                continue;
            };

            recognizer.stream_mut().seek(candidate.stop);
            let text = recognizer.stream().text(start, candidate.stop);
            let rule = candidate.rule;
            match rule.token_type {
                Some(token_type) if rule.command != Some(LexerCommand::Skip) => {
                    let token = Token {
                        token_type,
                        text,
                        position,
                        start,
                        stop: candidate.stop,
                        bindings: candidate.bindings,
                    };
                    recognizer.tracer().trace_token(&token);
                    tokens.push(token);
                }
                _ => recognizer.tracer().trace_skip(&rule.name, &text),
            }
        }
    }
}
