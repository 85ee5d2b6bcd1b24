//! Line-oriented read-eval-print loop

use std::io::{BufRead, Write};

use super::{execute_run, tokens_to_json, CliError, RunMode, RunOptions, RunResult};
use crate::DiagnosticSink;

const PROMPT: &str = "sophia> ";

/// Runs every input line as its own program until end of input or `.exit`.
///
/// Failures are printed and the loop continues; only I/O errors end it early.
pub fn run_repl<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    sink: &mut dyn DiagnosticSink,
    mode: RunMode,
) -> Result<(), CliError> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed == ".exit" {
            break;
        }

        if !trimmed.is_empty() {
            let options = RunOptions {
                source: line.into_bytes(),
                mode,
            };
            match execute_run(&options, sink) {
                Ok(RunResult::Value(value)) => writeln!(output, "{}", value)?,
                Ok(RunResult::JavaScript(js)) => writeln!(output, "{}", js)?,
                Ok(RunResult::Tokens(tokens)) => {
                    writeln!(output, "{}", tokens_to_json(&tokens))?
                }
                Err(e) => writeln!(output, "{}", e)?,
            }
        }

        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}
