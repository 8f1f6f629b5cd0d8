//! Recognizer: runs compiled rule bodies over a symbol stream.
//!
//! Set transitions run through [`SetMatcher`] and [`SetLoop`]. Branch blocks
//! try their alternatives in declaration order and keep the first that
//! matches, restoring the stream and the binding log from a checkpoint
//! after each failed attempt.
//!
//! Recovery only happens for parser rules and only outside speculation:
//! while alternatives are being tried, a failure just means "try the next
//! one", so nothing is reported.

use setfold_compiler::{
    BranchBlock, CompiledAlternative, CompiledBlock, CompiledElement, CompiledGrammar,
    CompiledRule, CompiledSetTransition,
};
use setfold_core::{DomainKind, Symbol, escape_display};

use super::cursor::SymbolStream;
use super::error::{RecognitionError, RecognitionErrorKind, RuntimeError};
use super::matcher::{LoopState, MatchOutcome, SetLoop, SetMatcher};
use super::trace::Tracer;
use super::value::{Binding, BoundValue};

/// Runtime limits for recognition.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum total steps (default: 1,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum rule call depth (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            recursion_limit: 1024,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Saved state for backtracking.
#[derive(Clone, Copy, Debug)]
struct Checkpoint {
    index: usize,
    /// Binding log length at checkpoint.
    binding_watermark: usize,
}

/// Whether a symbol can come next after a run of elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Follow {
    Admits,
    /// A mandatory element rejects it, or the next element is opaque.
    Stops,
    /// Every element can match empty; look further out.
    Nullable,
}

pub(crate) struct Recognizer<'g, 'r, S: ?Sized, T> {
    grammar: &'g CompiledGrammar,
    kind: DomainKind,
    stream: &'r mut S,
    tracer: &'r mut T,
    limits: FuelLimits,
    exec_fuel: u32,
    recursion_depth: u32,
    /// Nesting of alternatives being tried; reports and recovery are off while > 0.
    speculation: u32,
    bindings: Vec<Binding>,
    errors: Vec<RecognitionError>,
    /// Unmatched rest of each enclosing sequence, innermost last.
    follow: Vec<&'g [CompiledElement]>,
    rules: Vec<&'g str>,
    /// Furthest stream index a set test looked at.
    furthest: usize,
}

impl<'g, 'r, S: SymbolStream + ?Sized, T: Tracer> Recognizer<'g, 'r, S, T> {
    pub(crate) fn new(
        grammar: &'g CompiledGrammar,
        kind: DomainKind,
        stream: &'r mut S,
        tracer: &'r mut T,
        limits: FuelLimits,
    ) -> Self {
        let furthest = stream.index();
        Self {
            grammar,
            kind,
            stream,
            tracer,
            limits,
            exec_fuel: limits.get_exec_fuel(),
            recursion_depth: 0,
            speculation: 0,
            bindings: Vec::new(),
            errors: Vec::new(),
            follow: Vec::new(),
            rules: Vec::new(),
            furthest,
        }
    }

    pub(crate) fn stream(&self) -> &S {
        &*self.stream
    }

    pub(crate) fn stream_mut(&mut self) -> &mut S {
        &mut *self.stream
    }

    pub(crate) fn tracer(&mut self) -> &mut T {
        &mut *self.tracer
    }

    pub(crate) fn take_bindings(&mut self) -> Vec<Binding> {
        std::mem::take(&mut self.bindings)
    }

    pub(crate) fn take_errors(&mut self) -> Vec<RecognitionError> {
        std::mem::take(&mut self.errors)
    }

    pub(crate) fn furthest(&self) -> usize {
        self.furthest
    }

    pub(crate) fn reset_furthest(&mut self, index: usize) {
        self.furthest = index;
    }

    fn rule(&self, name: &str) -> Result<&'g CompiledRule, RuntimeError> {
        self.grammar
            .rule(name)
            .ok_or_else(|| RuntimeError::UnknownRule(name.to_string()))
    }

    fn tick(&mut self) -> Result<(), RuntimeError> {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted(self.limits.get_exec_fuel()));
        }
        self.exec_fuel -= 1;
        Ok(())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            index: self.stream.index(),
            binding_watermark: self.bindings.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.stream.seek(checkpoint.index);
        self.bindings.truncate(checkpoint.binding_watermark);
    }

    /// Match `rule` at the current position. On failure the stream is restored.
    pub(crate) fn match_rule(&mut self, rule: &'g CompiledRule) -> Result<bool, RuntimeError> {
        if rule.kind != self.kind {
            return Err(RuntimeError::WrongDomain {
                rule: rule.name.clone(),
                kind: rule.kind,
            });
        }
        if self.recursion_depth >= self.limits.get_recursion_limit() {
            return Err(RuntimeError::RecursionLimitExceeded(self.recursion_depth));
        }
        self.tick()?;

        self.recursion_depth += 1;
        self.rules.push(&rule.name);
        self.tracer.trace_enter_rule(&rule.name);

        let checkpoint = self.checkpoint();
        let matched = self.match_block(&rule.body)?;
        if !matched {
            self.restore(checkpoint);
        }

        self.tracer.trace_exit_rule(&rule.name, matched);
        self.rules.pop();
        self.recursion_depth -= 1;
        Ok(matched)
    }

    fn match_block(&mut self, block: &'g CompiledBlock) -> Result<bool, RuntimeError> {
        match block {
            CompiledBlock::Set(transition) => self.match_set(transition),
            CompiledBlock::Branches(branches) => self.match_branches(branches),
        }
    }

    fn match_element(&mut self, element: &'g CompiledElement) -> Result<bool, RuntimeError> {
        match element {
            CompiledElement::Set(transition) => self.match_set(transition),
            CompiledElement::Call { rule } => {
                let rule = self.rule(rule)?;
                self.match_rule(rule)
            }
            CompiledElement::Block(block) => self.match_block(block),
        }
    }

    fn match_set(&mut self, transition: &'g CompiledSetTransition) -> Result<bool, RuntimeError> {
        let mut set_loop = SetLoop::new(transition);
        loop {
            self.tick()?;
            self.furthest = self.furthest.max(self.stream.index());

            let symbol = self.stream.la(1);
            let mut outcome = SetMatcher::try_match(transition, &mut *self.stream);
            if outcome.failed {
                self.tracer.trace_match_failure(symbol, self.kind);
                if set_loop.state() == LoopState::Start
                    && let Some(recovered) = self.recover_inline(transition)
                {
                    outcome = recovered;
                }
            } else if let Some(symbol) = symbol {
                self.tracer.trace_match(symbol, self.kind);
            }

            if let Some(value) = outcome.bound_value.take() {
                self.bind(transition.label(), value);
            }

            match set_loop.step(!outcome.failed) {
                LoopState::Done => {
                    if transition.quantifier().is_repeating() {
                        self.tracer.trace_loop_exit(set_loop.matches());
                    }
                    return Ok(true);
                }
                LoopState::Failed => return Ok(false),
                LoopState::Start | LoopState::Looping => {}
            }
        }
    }

    /// Single-token deletion, then single-token insertion.
    ///
    /// Returns the outcome that stands in for the failed match, or `None`
    /// after reporting a mismatch.
    fn recover_inline(&mut self, transition: &'g CompiledSetTransition) -> Option<MatchOutcome> {
        if self.kind != DomainKind::Parser || self.speculation > 0 {
            return None;
        }

        let vocabulary = self.grammar.vocabulary();
        let index = self.stream.index();
        let current = self.stream.la(1);

        if current.is_some() && transition.matches(self.stream.la(2)) {
            let kind = RecognitionErrorKind::Extraneous {
                found: self.stream.display_at(index),
                expected: transition.expected(vocabulary),
            };
            self.report(kind, index);
            self.stream.consume();

            let symbol = self.stream.la(1);
            let outcome = SetMatcher::try_match(transition, &mut *self.stream);
            if let Some(symbol) = symbol {
                self.tracer.trace_match(symbol, self.kind);
            }
            return Some(outcome);
        }

        if self.follow_admits(current) {
            let kind = RecognitionErrorKind::Missing {
                expected: transition.expected(vocabulary),
                found: self.stream.display_at(index),
            };
            self.report(kind, index);
            return Some(MatchOutcome::conjured());
        }

        self.errors
            .push(SetMatcher::failure(transition, &*self.stream, vocabulary));
        None
    }

    /// Whether `symbol` may follow the element being matched.
    ///
    /// Walks the enclosing sequences outward; past the outermost one the
    /// start rule is complete and only end of input follows.
    fn follow_admits(&self, symbol: Option<Symbol>) -> bool {
        for rest in self.follow.iter().rev() {
            match self.first_of(rest, symbol) {
                Follow::Admits => return true,
                Follow::Stops => return false,
                Follow::Nullable => {}
            }
        }
        symbol.is_none()
    }

    fn first_of(&self, elements: &[CompiledElement], symbol: Option<Symbol>) -> Follow {
        for element in elements {
            let transition = match element {
                CompiledElement::Set(t) | CompiledElement::Block(CompiledBlock::Set(t)) => t,
                CompiledElement::Call { rule } => match self.grammar.rule(rule).map(|r| &r.body) {
                    Some(CompiledBlock::Set(t)) => t,
                    _ => return Follow::Stops,
                },
                CompiledElement::Block(CompiledBlock::Branches(_)) => return Follow::Stops,
            };
            if transition.matches(symbol) {
                return Follow::Admits;
            }
            if !transition.quantifier().can_be_empty() {
                return Follow::Stops;
            }
        }
        Follow::Nullable
    }

    /// Labels bind once per iteration, like a labeled set.
    fn match_branches(&mut self, block: &'g BranchBlock) -> Result<bool, RuntimeError> {
        let (min, max) = block.quantifier.bounds();
        let mut count = 0;

        while max.is_none_or(|max| count < max) {
            let start = self.stream.index();
            if !self.match_alternatives(block, count < min)? {
                break;
            }
            count += 1;

            let stop = self.stream.index();
            if let Some(label) = &block.label {
                let value = if stop == start + 1 {
                    self.stream.value_at(start)
                } else {
                    BoundValue::Text(self.stream.text(start, stop))
                };
                self.bind(Some(label), value);
            }
            // Zero-length iteration
            if stop == start {
                break;
            }
        }

        Ok(count >= min)
    }

    /// One iteration of a branch block.
    ///
    /// A mandatory iteration of a single alternative matches directly, with
    /// recovery. Anything else is tried speculatively, alternative by
    /// alternative, and the first success wins.
    fn match_alternatives(
        &mut self,
        block: &'g BranchBlock,
        mandatory: bool,
    ) -> Result<bool, RuntimeError> {
        let alternatives = &block.alternatives;
        if mandatory && alternatives.len() == 1 {
            return self.match_sequence(&alternatives[0]);
        }

        let checkpoint = self.checkpoint();
        let outer_furthest = std::mem::replace(&mut self.furthest, checkpoint.index);
        self.speculation += 1;
        let mut matched = false;
        for (i, alternative) in alternatives.iter().enumerate() {
            self.tick()?;
            self.tracer.trace_branch(i);
            if self.match_sequence(alternative)? {
                matched = true;
                break;
            }
            self.restore(checkpoint);
            self.tracer.trace_backtrack();
        }
        self.speculation -= 1;
        let reached = self.furthest;
        self.furthest = outer_furthest.max(reached);

        if !matched && mandatory && self.kind == DomainKind::Parser {
            // From the start of the decision through the token that ended it
            let text = self.stream.text(checkpoint.index, reached + 1);
            let found = if text.is_empty() {
                "<EOF>".to_string()
            } else {
                escape_display(&text)
            };
            self.report(RecognitionErrorKind::NoViableAlternative { found }, reached);
        }
        Ok(matched)
    }

    fn match_sequence(
        &mut self,
        alternative: &'g CompiledAlternative,
    ) -> Result<bool, RuntimeError> {
        let checkpoint = self.checkpoint();
        let elements = &alternative.elements;
        for (i, element) in elements.iter().enumerate() {
            self.follow.push(&elements[i + 1..]);
            let matched = self.match_element(element);
            self.follow.pop();
            if !matched? {
                self.restore(checkpoint);
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn bind(&mut self, label: Option<&str>, value: BoundValue) {
        let Some(label) = label else {
            return;
        };
        self.tracer.trace_bind(label, &value);
        let rule = self.rules.last().copied().unwrap_or_default();
        self.bindings.push(Binding::new(rule, label, value));
    }

    fn report(&mut self, kind: RecognitionErrorKind, index: usize) {
        if self.speculation == 0 {
            let position = self.stream.position_at(index);
            self.errors.push(RecognitionError::new(kind, position));
        }
    }
}
