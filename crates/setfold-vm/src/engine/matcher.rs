//! Set matching: one membership test per input symbol.
//!
//! A collapsed alternation never branches at runtime. Each step asks whether
//! the next symbol is admissible, and a quantified set is a loop around that
//! test with an explicit exit condition.

use setfold_compiler::CompiledSetTransition;
use setfold_core::{DomainKind, Vocabulary};

use super::cursor::SymbolStream;
use super::error::{RecognitionError, RecognitionErrorKind};
use super::value::BoundValue;

/// Result of testing one symbol against a set transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub consumed: bool,
    /// The matched symbol, when the transition is labeled.
    pub bound_value: Option<BoundValue>,
    pub failed: bool,
}

impl MatchOutcome {
    pub fn failure() -> Self {
        Self {
            consumed: false,
            bound_value: None,
            failed: true,
        }
    }

    /// Success without consuming anything: a symbol assumed present by recovery.
    pub fn conjured() -> Self {
        Self {
            consumed: false,
            bound_value: None,
            failed: false,
        }
    }
}

/// Runtime set-membership primitive.
pub struct SetMatcher;

impl SetMatcher {
    /// Test the next symbol and consume it on success.
    ///
    /// The cursor does not move on failure.
    pub fn try_match<S: SymbolStream + ?Sized>(
        transition: &CompiledSetTransition,
        stream: &mut S,
    ) -> MatchOutcome {
        if !transition.matches(stream.la(1)) {
            return MatchOutcome::failure();
        }

        let index = stream.index();
        let bound_value = transition.label().map(|_| stream.value_at(index));
        stream.consume();
        MatchOutcome {
            consumed: true,
            bound_value,
            failed: false,
        }
    }

    /// The error a failed match raises at the current position.
    pub fn failure<S: SymbolStream + ?Sized>(
        transition: &CompiledSetTransition,
        stream: &S,
        vocabulary: &Vocabulary,
    ) -> RecognitionError {
        let index = stream.index();
        let found = stream.display_at(index);
        let kind = match transition.domain().kind() {
            DomainKind::Lexer => RecognitionErrorKind::TokenRecognition { text: found },
            DomainKind::Parser => RecognitionErrorKind::Mismatched {
                found,
                expected: transition.expected(vocabulary),
            },
        };
        RecognitionError::new(kind, stream.position_at(index))
    }
}

/// Progress of a quantified set loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A match is still required.
    Start,
    /// Further matches are optional.
    Looping,
    Done,
    Failed,
}

impl LoopState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Quantifier state machine around one set transition.
///
/// `None` and `Plus` start in [`LoopState::Start`] and fail on a first
/// non-match; `Optional` and `Star` start in [`LoopState::Looping`] and finish
/// on one. The loop is greedy and never backtracks: each decision depends
/// only on the symbol at hand.
#[derive(Debug, Clone)]
pub struct SetLoop<'t> {
    transition: &'t CompiledSetTransition,
    state: LoopState,
    matches: usize,
}

impl<'t> SetLoop<'t> {
    pub fn new(transition: &'t CompiledSetTransition) -> Self {
        let state = if transition.quantifier().can_be_empty() {
            LoopState::Looping
        } else {
            LoopState::Start
        };
        Self {
            transition,
            state,
            matches: 0,
        }
    }

    pub fn transition(&self) -> &'t CompiledSetTransition {
        self.transition
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Successful steps so far.
    pub fn matches(&self) -> usize {
        self.matches
    }

    /// Feed the result of one match attempt.
    pub fn step(&mut self, matched: bool) -> LoopState {
        self.state = match (self.state, matched) {
            (LoopState::Done | LoopState::Failed, _) => self.state,
            (LoopState::Start, false) => LoopState::Failed,
            (LoopState::Looping, false) => LoopState::Done,
            (LoopState::Start | LoopState::Looping, true) => {
                self.matches += 1;
                if self.transition.quantifier().is_repeating() {
                    LoopState::Looping
                } else {
                    LoopState::Done
                }
            }
        };
        self.state
    }
}
