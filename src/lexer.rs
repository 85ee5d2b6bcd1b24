use std::mem;

use crate::{
    ast::{Token, TokenKind},
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
};

/// Hand-written scanner turning source bytes into tokens.
///
/// The lexer makes a single forward pass with one character of lookahead.
/// Problems are reported to a [`DiagnosticSink`] as they are found and set a
/// persistent error flag; if the flag is set when the pass ends, the whole
/// token sequence collapses to a single [`TokenKind::Eof`].
///
/// # Examples
///
/// ```
/// use sophia_lang::{Diagnostic, Lexer, TokenKind};
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let mut lexer = Lexer::new(b"(++ \"a\" \"b\")");
/// let tokens = lexer.lex(&mut diagnostics);
///
/// assert!(!lexer.has_error());
/// assert_eq!(tokens[1].kind, TokenKind::Merge);
/// assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
/// ```
pub struct Lexer {
    source: String,
    /// Decoded characters with their byte offsets into the input
    chars: Vec<(usize, char)>,
    input_len: usize,
    cursor: usize,
    line: usize,
    column: usize,
    has_error: bool,
}

impl Lexer {
    /// Creates a lexer over raw bytes. Invalid UTF-8 sequences decode to
    /// U+FFFD and are later reported as unknown tokens.
    pub fn new(input: &[u8]) -> Self {
        let mut chars = Vec::with_capacity(input.len());
        let mut offset = 0;
        for chunk in input.utf8_chunks() {
            let valid = chunk.valid();
            chars.extend(valid.char_indices().map(|(i, ch)| (offset + i, ch)));
            offset += valid.len();
            if !chunk.invalid().is_empty() {
                chars.push((offset, char::REPLACEMENT_CHARACTER));
                offset += chunk.invalid().len();
            }
        }

        Lexer {
            source: String::from_utf8_lossy(input).into_owned(),
            chars,
            input_len: input.len(),
            cursor: 0,
            line: 0,
            column: 0,
            has_error: false,
        }
    }

    /// Whether any error was detected during the last pass.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// The decoded source text, as used for diagnostic excerpts.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Scans the whole input.
    ///
    /// Returns the tokens terminated by `Eof`, or exactly `[Eof]` when any
    /// error was reported.
    pub fn lex(&mut self, sink: &mut dyn DiagnosticSink) -> Vec<Token> {
        let tokens = self.scan(sink);
        tracing::debug!(
            tokens = tokens.len(),
            has_error = self.has_error,
            "lexing finished"
        );

        if self.has_error {
            return vec![Token::eof(self.position(), self.line)];
        }
        tokens
    }

    /// The pass itself, without collapsing on error. An unterminated template
    /// string aborts it and yields no tokens at all.
    fn scan(&mut self, sink: &mut dyn DiagnosticSink) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.current() {
            let kind = match ch {
                '+' if self.peek() == Some('+') => {
                    let token = Token::new(TokenKind::Merge, "++", self.position(), self.line);
                    self.advance();
                    self.advance();
                    tokens.push(token);
                    continue;
                }
                '+' => TokenKind::Add,
                '-' => TokenKind::Sub,
                '/' => TokenKind::Div,
                '*' => TokenKind::Mul,
                '%' => TokenKind::Mod,
                '(' => TokenKind::LeftBrace,
                ')' => TokenKind::RightBrace,
                '{' => TokenKind::LeftCurly,
                '}' => TokenKind::RightCurly,
                '[' => TokenKind::LeftBracket,
                ']' => TokenKind::RightBracket,
                ':' => TokenKind::Colon,
                '.' => TokenKind::Dot,
                '_' => TokenKind::Param,
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                    continue;
                }
                ';' if self.peek() == Some(';') => {
                    self.skip_comment();
                    continue;
                }
                '"' => {
                    let token = self.string(sink);
                    tokens.push(token);
                    continue;
                }
                '\'' => {
                    match self.template_string(sink) {
                        Some(mut parts) => tokens.append(&mut parts),
                        None => return Vec::new(),
                    }
                    continue;
                }
                c if c.is_alphabetic() => {
                    tokens.push(self.ident());
                    continue;
                }
                c if c.is_ascii_digit() => {
                    tokens.push(self.number());
                    continue;
                }
                _ => TokenKind::Unknown,
            };

            if kind == TokenKind::Unknown {
                self.report(sink, DiagnosticKind::UnknownToken, self.line, self.column, ch);
            }

            tokens.push(Token::new(kind, ch, self.position(), self.line));
            self.advance();
        }

        tokens.push(Token::eof(self.position(), self.line));
        tokens
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.cursor).map(|(_, ch)| *ch)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor + 1).map(|(_, ch)| *ch)
    }

    /// Byte offset of the current character, or the input length at the end.
    fn position(&self) -> usize {
        self.chars
            .get(self.cursor)
            .map_or(self.input_len, |(offset, _)| *offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
            self.cursor += 1;
        }
    }

    fn report(
        &mut self,
        sink: &mut dyn DiagnosticSink,
        kind: DiagnosticKind,
        line: usize,
        column: usize,
        text: impl Into<String>,
    ) {
        let diagnostic = Diagnostic::new(kind, &self.source, line, column, text);
        sink.report(diagnostic);
        self.has_error = true;
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.current() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn string(&mut self, sink: &mut dyn DiagnosticSink) -> Token {
        let (position, line, column) = (self.position(), self.line, self.column);
        self.advance(); // opening quote

        let mut text = String::new();
        while let Some(ch) = self.current() {
            if ch == '"' || ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        if self.current() == Some('"') {
            self.advance();
        } else {
            self.report(sink, DiagnosticKind::UnterminatedString, line, column + 1, text.as_str());
        }

        Token::new(TokenKind::String, text, position, line)
    }

    fn template_string(&mut self, sink: &mut dyn DiagnosticSink) -> Option<Vec<Token>> {
        let mut tokens = vec![Token::new(
            TokenKind::TemplateString,
            "",
            self.position(),
            self.line,
        )];
        let mut text = String::new();
        let mut text_start = 0;

        self.advance(); // opening quote

        loop {
            match self.current() {
                // Braces are not balance-checked.
                Some('}') => self.advance(),
                Some('{') => {
                    flush_text(&mut text, text_start, self.line, &mut tokens);
                    self.advance();
                    tokens.push(self.ident());
                }
                Some('\'') => {
                    flush_text(&mut text, text_start, self.line, &mut tokens);
                    self.advance();
                    break;
                }
                None | Some('\n') => {
                    self.report(
                        sink,
                        DiagnosticKind::UnterminatedTemplate,
                        self.line,
                        self.column,
                        "",
                    );
                    return None;
                }
                Some(ch) => {
                    if text.is_empty() {
                        text_start = self.position();
                    }
                    text.push(ch);
                    self.advance();
                }
            }
        }

        tokens.push(Token::new(
            TokenKind::TemplateString,
            "",
            self.position(),
            self.line,
        ));
        Some(tokens)
    }

    /// Scans an identifier, boolean or keyword. Yields an empty `Ident` when
    /// the current character cannot start one.
    fn ident(&mut self) -> Token {
        let (position, line) = (self.position(), self.line);
        let mut text = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match text.as_str() {
            "true" | "false" => TokenKind::Bool,
            other => TokenKind::keyword(other).unwrap_or(TokenKind::Ident),
        };
        Token::new(kind, text, position, line)
    }

    /// Greedy numeric scan. The literal is not validated here; `1.2.3` and
    /// `1e` are accepted and left for the parser to reject.
    fn number(&mut self) -> Token {
        let (position, line) = (self.position(), self.line);
        let mut text = String::new();
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() || matches!(ch, '.' | '_' | 'e' | '-') {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Float, text, position, line)
    }
}

fn flush_text(text: &mut String, start: usize, line: usize, tokens: &mut Vec<Token>) {
    if !text.is_empty() {
        tokens.push(Token::new(TokenKind::String, mem::take(text), start, line));
    }
}

#[test]
fn test_unterminated_string_keeps_partial_text_before_collapse() {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut lexer = Lexer::new(b"\"abc");
    let tokens = lexer.scan(&mut diagnostics);

    assert!(lexer.has_error());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].raw, "abc");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_unterminated_template_aborts_the_pass() {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut lexer = Lexer::new(b"'abc{x");
    let tokens = lexer.scan(&mut diagnostics);

    assert!(lexer.has_error());
    assert!(tokens.is_empty());
}

#[test]
fn test_template_newline_stops_scanning_rest_of_input() {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut lexer = Lexer::new(b"'abc\n$ $ $");
    lexer.scan(&mut diagnostics);

    // Only the template error, the unknown tokens after it are never seen.
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnterminatedTemplate);
}

#[test]
fn test_unknown_token_scan_continues() {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut lexer = Lexer::new(b"$ 1 #");
    let tokens = lexer.scan(&mut diagnostics);

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Unknown, TokenKind::Float, TokenKind::Unknown, TokenKind::Eof]
    );
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_invalid_utf8_positions_are_byte_offsets() {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut lexer = Lexer::new(b"a \xFF\xFE b");
    let tokens = lexer.scan(&mut diagnostics);

    assert_eq!(tokens[0].position, 0);
    assert_eq!(tokens[1].kind, TokenKind::Unknown);
    assert_eq!(tokens[1].position, 2);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert!(lexer.has_error());
}
