use setfold_compiler::CompiledSetTransition;
use setfold_core::{Domain, Quantifier, SymbolSet, Vocabulary};

use super::{
    BoundValue, CharStream, LoopState, MatchOutcome, Position, SetLoop, SetMatcher, SymbolStream,
    Token, TokenStream,
};

fn lexer_set(chars: &str, negated: bool, quantifier: Quantifier) -> CompiledSetTransition {
    CompiledSetTransition::new(
        SymbolSet::from_chars(chars),
        negated,
        quantifier,
        None,
        Domain::lexer(),
    )
}

/// Run a set loop to completion; returns the final state and symbols consumed.
fn drive(transition: &CompiledSetTransition, input: &str) -> (LoopState, usize) {
    let mut stream = CharStream::new(input);
    let mut set_loop = SetLoop::new(transition);
    loop {
        let outcome = SetMatcher::try_match(transition, &mut stream);
        let state = set_loop.step(!outcome.failed);
        if state.is_terminal() {
            return (state, stream.index());
        }
    }
}

fn tokens(types: &[u32]) -> TokenStream {
    let tokens = types
        .iter()
        .enumerate()
        .map(|(i, &t)| Token::new(t, format!("t{t}"), Position::new(1, i as u32 * 2)))
        .collect();
    TokenStream::new(tokens)
}

#[test]
fn member_is_consumed() {
    let set = lexer_set("ab", false, Quantifier::None);
    let mut stream = CharStream::new("bx");

    let outcome = SetMatcher::try_match(&set, &mut stream);
    assert_eq!(
        outcome,
        MatchOutcome {
            consumed: true,
            bound_value: None,
            failed: false
        }
    );
    assert_eq!(stream.index(), 1);

    let outcome = SetMatcher::try_match(&set, &mut stream);
    assert_eq!(outcome, MatchOutcome::failure());
    assert_eq!(stream.index(), 1, "failure does not advance");
}

#[test]
fn negation_flips_membership() {
    let set = lexer_set("bc", true, Quantifier::None);
    assert!(!SetMatcher::try_match(&set, &mut CharStream::new("x")).failed);
    assert!(SetMatcher::try_match(&set, &mut CharStream::new("b")).failed);
    assert!(SetMatcher::try_match(&set, &mut CharStream::new("c")).failed);
}

#[test]
fn end_of_input_never_matches() {
    for negated in [false, true] {
        let set = lexer_set("a", negated, Quantifier::None);
        let mut stream = CharStream::new("");
        assert!(SetMatcher::try_match(&set, &mut stream).failed);
    }

    let domain = Domain::parser(3);
    let everything =
        CompiledSetTransition::new(SymbolSet::empty(), true, Quantifier::None, None, domain);
    let mut stream = tokens(&[]);
    assert!(SetMatcher::try_match(&everything, &mut stream).failed);
}

#[test]
fn label_binds_matched_symbol_under_negation() {
    let set = CompiledSetTransition::new(
        SymbolSet::from_chars("bc"),
        true,
        Quantifier::None,
        Some("h".to_string()),
        Domain::lexer(),
    );
    let outcome = SetMatcher::try_match(&set, &mut CharStream::new("x"));
    assert_eq!(outcome.bound_value, Some(BoundValue::Char('x')));
}

#[test]
fn parser_label_binds_token() {
    let set = CompiledSetTransition::new(
        SymbolSet::from_symbols([1, 2]),
        true,
        Quantifier::None,
        Some("t".to_string()),
        Domain::parser(3),
    );
    let mut stream = tokens(&[3]);
    let outcome = SetMatcher::try_match(&set, &mut stream);
    let Some(BoundValue::Token(token)) = outcome.bound_value else {
        panic!("expected a token binding");
    };
    assert_eq!(token.token_type, 3);
    assert_eq!(token.text, "t3");
}

#[test]
fn symbols_outside_domain_never_match() {
    // Token 9 is not a type of this grammar, even though the set is negated.
    let set = CompiledSetTransition::new(
        SymbolSet::single(1),
        true,
        Quantifier::None,
        None,
        Domain::parser(3),
    );
    assert!(SetMatcher::try_match(&set, &mut tokens(&[9])).failed);
    assert!(!SetMatcher::try_match(&set, &mut tokens(&[2])).failed);
}

#[test]
fn failure_messages() {
    let set = lexer_set("\n", false, Quantifier::None);
    let stream = CharStream::new("a");
    let error = SetMatcher::failure(&set, &stream, &Vocabulary::new());
    insta::assert_snapshot!(error, @"line 1:0 token recognition error at: 'a'");

    let mut vocabulary = Vocabulary::new();
    vocabulary.define(1, Some("'x'"), None);
    vocabulary.define(2, Some("'y'"), None);
    vocabulary.define(3, None, Some("ID"));
    let set = CompiledSetTransition::new(
        SymbolSet::from_symbols([1, 2]),
        false,
        Quantifier::None,
        None,
        Domain::parser(3),
    );
    let error = SetMatcher::failure(&set, &tokens(&[3]), &vocabulary);
    insta::assert_snapshot!(error, @"line 1:0 mismatched input 't3' expecting {'x', 'y'}");
    assert_eq!(error.offending_or_expected(), "{'x', 'y'}");

    let error = SetMatcher::failure(&set, &tokens(&[]), &vocabulary);
    insta::assert_snapshot!(error, @"line 1:0 mismatched input '<EOF>' expecting {'x', 'y'}");
}

#[test]
fn quantifier_boundary_on_first_mismatch() {
    let cases = [
        (Quantifier::None, LoopState::Failed),
        (Quantifier::Optional, LoopState::Done),
        (Quantifier::Star, LoopState::Done),
        (Quantifier::Plus, LoopState::Failed),
    ];
    for (quantifier, expected) in cases {
        let set = lexer_set("ab", false, quantifier);
        assert_eq!(drive(&set, "x"), (expected, 0), "{quantifier:?}");
    }
}

#[test]
fn quantifiers_consume_greedily() {
    let cases = [
        (Quantifier::None, 1),
        (Quantifier::Optional, 1),
        (Quantifier::Star, 3),
        (Quantifier::Plus, 3),
    ];
    for (quantifier, consumed) in cases {
        let set = lexer_set("ab", false, quantifier);
        assert_eq!(drive(&set, "abax"), (LoopState::Done, consumed), "{quantifier:?}");
    }
}

#[test]
fn loops_stop_at_end_of_input() {
    let set = lexer_set("ab", false, Quantifier::Star);
    assert_eq!(drive(&set, "abab"), (LoopState::Done, 4));
    let set = lexer_set("ab", false, Quantifier::Plus);
    assert_eq!(drive(&set, ""), (LoopState::Failed, 0));
}

#[test]
fn loop_states() {
    let plus = lexer_set("a", false, Quantifier::Plus);
    let mut set_loop = SetLoop::new(&plus);
    assert_eq!(set_loop.state(), LoopState::Start);
    assert_eq!(set_loop.step(true), LoopState::Looping);
    assert_eq!(set_loop.step(true), LoopState::Looping);
    assert_eq!(set_loop.step(false), LoopState::Done);
    assert_eq!(set_loop.step(true), LoopState::Done, "terminal states stick");
    assert_eq!(set_loop.matches(), 2);

    let optional = lexer_set("a", false, Quantifier::Optional);
    let mut set_loop = SetLoop::new(&optional);
    assert_eq!(set_loop.state(), LoopState::Looping);
    assert_eq!(set_loop.step(true), LoopState::Done);
}

#[test]
fn collapsed_test_agrees_with_each_alternative() {
    // 'a' | 'c' | 'd' | 'x'..'z' as one set versus trying each alternative in turn.
    let alternatives = [
        SymbolSet::single('a' as u32),
        SymbolSet::single('c' as u32),
        SymbolSet::single('d' as u32),
        SymbolSet::from_chars("xyz"),
    ];
    let union = alternatives.iter().fold(SymbolSet::empty(), |acc, s| acc.union(s));
    let collapsed = CompiledSetTransition::single(union, Domain::lexer());

    for c in ('\0'..='\u{7f}').chain(['é', '\u{10FFFF}']) {
        let input = c.to_string();
        let by_branch = alternatives.iter().any(|alt| {
            let t = CompiledSetTransition::single(alt.clone(), Domain::lexer());
            !SetMatcher::try_match(&t, &mut CharStream::new(&input)).failed
        });
        let by_set = !SetMatcher::try_match(&collapsed, &mut CharStream::new(&input)).failed;
        assert_eq!(by_set, by_branch, "{c:?}");
    }
}

#[test]
fn token_stream_ends_with_eof() {
    let mut stream = tokens(&[1, 2]);
    assert_eq!(stream.tokens().len(), 3);
    assert_eq!(stream.la(1), Some(1));
    assert_eq!(stream.la(2), Some(2));
    assert_eq!(stream.la(3), None);
    stream.consume();
    stream.consume();
    stream.consume();
    assert_eq!(stream.index(), 2, "consume stops at EOF");
    assert_eq!(stream.display_at(2), "<EOF>");
    assert_eq!(stream.position_at(2), Position::new(1, 4));
    assert_eq!(stream.text(0, 3), "t1t2");
}

#[test]
fn char_stream_positions() {
    let stream = CharStream::new("ab\ncd\n");
    assert_eq!(stream.len(), 6);
    assert!(!stream.is_empty());
    assert!(CharStream::new("").is_empty());
    assert_eq!(stream.position_at(0), Position::new(1, 0));
    assert_eq!(stream.position_at(2), Position::new(1, 2));
    assert_eq!(stream.position_at(4), Position::new(2, 1));
    assert_eq!(stream.position_at(6), Position::new(3, 0));
    assert_eq!(stream.position_at(99), Position::new(3, 0));
    assert_eq!(stream.display_at(2), "\\n");
    assert_eq!(stream.display_at(6), "<EOF>");
}

#[test]
fn token_serializes_without_empty_bindings() {
    let token = Token::new(4, "if", Position::new(2, 3));
    let json = serde_json::to_value(&token).unwrap();
    assert_eq!(json["token_type"], 4);
    assert_eq!(json["text"], "if");
    assert_eq!(json["position"]["line"], 2);
    assert!(json.get("bindings").is_none());
}
