//! Lex, parse and run a program through one backend

use serde_json::json;

use super::CliError;
use crate::{Compiler, DiagnosticSink, Evaluator, Lexer, Parser, Token, Value};

/// What to do with the source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Interpret the program
    #[default]
    Eval,
    /// Transpile the program to JavaScript
    Compile,
    /// Stop after lexing
    Tokens,
}

/// Options for a run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Raw program source
    pub source: Vec<u8>,
    pub mode: RunMode,
}

/// Result of a run, one variant per mode
#[derive(Debug)]
pub enum RunResult {
    Value(Value),
    JavaScript(String),
    Tokens(Vec<Token>),
}

/// Runs the front end over `options.source`.
///
/// Diagnostics go to `sink` as they are detected; the returned error is the
/// generic failure for the stage that reported them.
pub fn execute_run(
    options: &RunOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<RunResult, CliError> {
    let mut lexer = Lexer::new(&options.source);
    let tokens = lexer.lex(sink);
    if lexer.has_error() {
        return Err(CliError::Lex);
    }

    if options.mode == RunMode::Tokens {
        return Ok(RunResult::Tokens(tokens));
    }

    let parsed = Parser::new(tokens, lexer.source()).parse(sink);
    if parsed.has_error {
        return Err(CliError::Parse);
    }

    let root = parsed.root.as_deref();
    let result = match options.mode {
        RunMode::Compile => RunResult::JavaScript(Compiler::new().compile(root)),
        _ => RunResult::Value(Evaluator::new().eval(root)),
    };
    Ok(result)
}

/// Token dump used by `sophia lex`
pub fn tokens_to_json(tokens: &[Token]) -> serde_json::Value {
    tokens
        .iter()
        .map(|token| {
            json!({
                "kind": token.kind.name(),
                "raw": token.raw,
                "line": token.line,
                "position": token.position,
            })
        })
        .collect()
}
