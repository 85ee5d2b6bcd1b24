//! Reference parser for the expression subset the AST currently covers.
//!
//! ```text
//! program := expr? EOF
//! expr    := FLOAT | STRING | BOOL | list | merge
//! list    := '[' expr* ']'
//! merge   := '(' '++' expr* ')'
//! ```
//!
//! Like the lexer, the parser reports problems to a [`DiagnosticSink`] and
//! exposes a flag instead of returning `Err`. It stops at the first problem.
//!
//! Nodes are built and walked recursively, so lists and merges may nest at
//! most [`MAX_NESTING`] levels deep.

use crate::{
    ast::{Bool, Float, List, Merge, Node, Str, Token, TokenKind},
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
};

/// Deepest allowed nesting of lists and merges.
pub const MAX_NESTING: usize = 256;

/// Result of a parse: the root node, if any, and whether errors occurred.
#[derive(Debug)]
pub struct Parsed {
    pub root: Option<Box<dyn Node>>,
    pub has_error: bool,
}

pub struct Parser {
    tokens: Vec<Token>,
    source: String,
    current: usize,
    depth: usize,
    has_error: bool,
}

impl Parser {
    /// `source` is the text the tokens were scanned from, used for excerpts.
    pub fn new(tokens: Vec<Token>, source: &str) -> Self {
        Parser {
            tokens,
            source: source.to_string(),
            current: 0,
            depth: 0,
            has_error: false,
        }
    }

    /// Parses the whole token stream.
    ///
    /// An empty stream (just `Eof`, which is also what a failed lex produces)
    /// yields no root and no error. On error the root is dropped.
    pub fn parse(mut self, sink: &mut dyn DiagnosticSink) -> Parsed {
        if self.check(TokenKind::Eof) {
            return Parsed {
                root: None,
                has_error: false,
            };
        }

        let root = self.parse_expression(sink);
        if root.is_some() && !self.check(TokenKind::Eof) {
            let token = self.advance();
            self.unexpected(sink, &token);
        }

        tracing::debug!(has_error = self.has_error, "parsing finished");
        Parsed {
            root: if self.has_error { None } else { root },
            has_error: self.has_error,
        }
    }

    /// A missing token counts as `Eof`.
    fn check(&self, kind: TokenKind) -> bool {
        self.tokens
            .get(self.current)
            .map_or(TokenKind::Eof, |t| t.kind)
            == kind
    }

    /// Returns the current token and moves past it. Past the end of the
    /// stream this keeps returning an `Eof` token.
    fn advance(&mut self) -> Token {
        match self.tokens.get(self.current) {
            Some(token) => {
                let token = token.clone();
                if token.kind != TokenKind::Eof {
                    self.current += 1;
                }
                token
            }
            None => Token::eof(self.source.len(), 0),
        }
    }

    fn parse_expression(&mut self, sink: &mut dyn DiagnosticSink) -> Option<Box<dyn Node>> {
        let token = self.advance();
        match token.kind {
            TokenKind::Float => {
                let digits: String = token.raw.chars().filter(|c| *c != '_').collect();
                match digits.parse::<f64>() {
                    Ok(value) => Some(Box::new(Float { token, value })),
                    Err(_) => {
                        self.report(sink, DiagnosticKind::MalformedNumber, &token);
                        None
                    }
                }
            }
            TokenKind::String => {
                let value = token.raw.clone();
                Some(Box::new(Str { token, value }))
            }
            TokenKind::Bool => {
                let value = token.raw == "true";
                Some(Box::new(Bool { token, value }))
            }
            TokenKind::LeftBracket => {
                self.enter(sink, &token)?;
                let children = self.parse_children(sink, TokenKind::RightBracket);
                self.depth -= 1;
                Some(Box::new(List {
                    token,
                    children: children?,
                }))
            }
            TokenKind::LeftBrace => {
                if !self.check(TokenKind::Merge) {
                    let found = self.advance();
                    self.unexpected(sink, &found);
                    return None;
                }
                let operator = self.advance();
                self.enter(sink, &token)?;
                let children = self.parse_children(sink, TokenKind::RightBrace);
                self.depth -= 1;
                Some(Box::new(Merge::new(operator, children?)))
            }
            _ => {
                self.unexpected(sink, &token);
                None
            }
        }
    }

    /// Parses expressions up to and including the closing token.
    fn parse_children(
        &mut self,
        sink: &mut dyn DiagnosticSink,
        close: TokenKind,
    ) -> Option<Vec<Box<dyn Node>>> {
        let mut children = Vec::new();
        loop {
            if self.check(close) {
                self.advance();
                return Some(children);
            }
            if self.check(TokenKind::Eof) {
                let token = self.advance();
                self.unexpected(sink, &token);
                return None;
            }
            children.push(self.parse_expression(sink)?);
        }
    }

    /// Opens one nesting level, or reports `opening` when the limit is hit.
    fn enter(&mut self, sink: &mut dyn DiagnosticSink, opening: &Token) -> Option<()> {
        if self.depth >= MAX_NESTING {
            self.report(sink, DiagnosticKind::NestingTooDeep, opening);
            return None;
        }
        self.depth += 1;
        Some(())
    }

    fn unexpected(&mut self, sink: &mut dyn DiagnosticSink, token: &Token) {
        self.report(sink, DiagnosticKind::UnexpectedToken, token);
    }

    fn report(&mut self, sink: &mut dyn DiagnosticSink, kind: DiagnosticKind, token: &Token) {
        let text = if token.raw.is_empty() {
            token.kind.name().to_string()
        } else {
            token.raw.clone()
        };
        let column = self.column_of(token.position);
        sink.report(Diagnostic::new(kind, &self.source, token.line, column, text));
        self.has_error = true;
    }

    /// Character column of a byte offset within its line.
    fn column_of(&self, position: usize) -> usize {
        let Some(before) = self.source.get(..position) else {
            return 0;
        };
        match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count(),
            None => before.chars().count(),
        }
    }
}
