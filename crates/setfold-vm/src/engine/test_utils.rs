//! Test utilities.

use setfold_compiler::{CompileOptions, CompiledGrammar, Grammar, GrammarCompiler};

use super::{ErrorCollector, Lexer, ParseOutcome, Parser, Token};

#[track_caller]
pub fn compile(grammar: &Grammar) -> CompiledGrammar {
    GrammarCompiler::new(grammar)
        .compile()
        .expect("expected valid grammar")
}

#[track_caller]
pub fn compile_unoptimized(grammar: &Grammar) -> CompiledGrammar {
    GrammarCompiler::new(grammar)
        .options(CompileOptions::unoptimized())
        .compile()
        .expect("expected valid grammar")
}

/// Tokens and lexer errors for `input`.
#[track_caller]
pub fn lex(compiled: &CompiledGrammar, input: &str) -> (Vec<Token>, ErrorCollector) {
    let mut errors = ErrorCollector::new();
    let tokens = Lexer::new(compiled)
        .tokenize(input, &mut errors)
        .expect("lexing failed");
    (tokens, errors)
}

/// Lex and parse `input` from `rule`; errors from both stages are collected.
#[track_caller]
pub fn parse(compiled: &CompiledGrammar, rule: &str, input: &str) -> (ParseOutcome, ErrorCollector) {
    let (tokens, mut errors) = lex(compiled, input);
    let outcome = Parser::new(compiled)
        .parse(rule, &tokens, &mut errors)
        .expect("parsing failed");
    (outcome, errors)
}

/// What a run prints: reported errors, then bindings, then the verdict.
#[track_caller]
pub fn run(compiled: &CompiledGrammar, rule: &str, input: &str) -> String {
    let (outcome, errors) = parse(compiled, rule, input);
    let mut lines: Vec<String> = errors.errors().iter().map(ToString::to_string).collect();
    lines.extend(outcome.bindings.iter().map(ToString::to_string));
    if outcome.matched {
        lines.push(format!("matched '{}'", outcome.text));
    } else {
        lines.push("no match".to_string());
    }
    lines.join("\n")
}

/// One `NAME 'text'` line per token, after any lexer errors.
#[track_caller]
pub fn dump_tokens(compiled: &CompiledGrammar, input: &str) -> String {
    let (tokens, errors) = lex(compiled, input);
    let vocabulary = compiled.vocabulary();
    let mut lines: Vec<String> = errors.errors().iter().map(ToString::to_string).collect();
    for token in &tokens {
        let name = if token.is_eof() {
            "EOF".to_string()
        } else {
            vocabulary.display_name(token.token_type).into_owned()
        };
        let mut line = format!("{name} '{}'", token.display_text());
        for binding in &token.bindings {
            line.push_str(&format!(" {binding}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}
