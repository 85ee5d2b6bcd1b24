//! Source-level diagnostics.
//!
//! The lexer and parser never fail with `Err`. They hand each problem to a
//! [`DiagnosticSink`] the moment it is detected and keep going (or stop, for
//! fatal cases), leaving the caller to check their error flag afterwards.
//!
//! Every diagnostic carries a rendered excerpt: the offending line, the line
//! before it when there is one, and a caret span under the offending text.
//!
//! ```text
//! err: Unknown token '$' at [l 2:4]
//!
//! 001 |	(++ "a"
//! 002 |	"b" $)
//! 	    ^
//! ```

use std::fmt;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A character that starts no token
    UnknownToken,
    /// A double-quoted string without its closing quote
    UnterminatedString,
    /// A newline or end of input inside a template string
    UnterminatedTemplate,
    /// A numeric literal that does not parse as a number
    MalformedNumber,
    /// A token the parser cannot use at this point
    UnexpectedToken,
    /// A list or merge opened past the parser's nesting limit
    NestingTooDeep,
}

/// A single reported problem, located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 0-based line of the offending text
    pub line: usize,
    /// 0-based column, in characters, where the offending text starts
    pub column: usize,
    /// Number of carets drawn under the offending text, at least 1
    pub width: usize,
    /// The offending text itself, possibly empty
    pub text: String,
    /// Rendered source excerpt with the caret line
    pub excerpt: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        source: &str,
        line: usize,
        column: usize,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let width = text.chars().count().max(1);
        let excerpt = render_excerpt(source, line, column, width);
        Diagnostic {
            kind,
            line,
            column,
            width,
            text,
            excerpt,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = (self.line + 1, self.column + 1);
        match self.kind {
            DiagnosticKind::UnknownToken => {
                write!(f, "err: Unknown token '{}' at [l {}:{}]", self.text, line, column)
            }
            DiagnosticKind::UnterminatedString => {
                write!(f, "err: Unterminated String at [l {}:{}]", line, column)
            }
            DiagnosticKind::UnterminatedTemplate => {
                write!(f, "err: Unexpected Newline or EOF at [l {}:{}]", line, column)
            }
            DiagnosticKind::MalformedNumber => write!(
                f,
                "err: Invalid floating point number '{}' at [l {}:{}]",
                self.text, line, column
            ),
            DiagnosticKind::UnexpectedToken => {
                write!(f, "err: Unexpected token '{}' at [l {}:{}]", self.text, line, column)
            }
            DiagnosticKind::NestingTooDeep => write!(
                f,
                "err: Expression nested deeper than {} levels at [l {}:{}]",
                crate::parser::MAX_NESTING,
                line,
                column
            ),
        }
    }
}

/// Renders the excerpt for a problem at `line`/`column` (both 0-based).
///
/// Line numbers in the excerpt are 1-based and zero padded to three digits.
pub fn render_excerpt(source: &str, line: usize, column: usize, width: usize) -> String {
    let lines: Vec<&str> = source.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let current = lines.get(line).copied().unwrap_or("");
    let spaces = " ".repeat(column);
    let carets = "^".repeat(width.max(1));

    if line > 0 {
        let previous = lines.get(line - 1).copied().unwrap_or("");
        format!(
            "\n{:03} |\t{}\n{:03} |\t{}\n\t{}{}\n\n",
            line,
            previous,
            line + 1,
            current,
            spaces,
            carets
        )
    } else {
        format!("\n{:03} |\t{}\n\t{}{}\n\n", line + 1, current, spaces, carets)
    }
}

/// Receives diagnostics as they are detected.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Logs the message through `tracing` and writes the excerpt to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::error!(
            line = diagnostic.line + 1,
            column = diagnostic.column + 1,
            "{}",
            diagnostic
        );
        eprint!("{}", diagnostic.excerpt);
    }
}

#[test]
fn test_excerpt_first_line() {
    let excerpt = render_excerpt("abc $ def", 0, 4, 1);
    assert_eq!(excerpt, "\n001 |\tabc $ def\n\t    ^\n\n");
}

#[test]
fn test_excerpt_includes_previous_line() {
    let excerpt = render_excerpt("one\ntwo \"three", 1, 5, 5);
    assert_eq!(excerpt, "\n001 |\tone\n002 |\ttwo \"three\n\t     ^^^^^\n\n");
}

#[test]
fn test_width_has_a_minimum_of_one() {
    let diagnostic = Diagnostic::new(DiagnosticKind::UnterminatedTemplate, "'ab", 0, 3, "");
    assert_eq!(diagnostic.width, 1);
    assert!(diagnostic.excerpt.ends_with("\t   ^\n\n"));
}
