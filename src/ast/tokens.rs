use std::fmt;

/// Classification of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Byte that starts no known token
    Unknown,

    // Literals
    /// Numeric literal, scanned greedily
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// 1_000e-3
    /// ```
    Float,

    /// Double-quoted string, or a literal chunk of a template string.
    /// `raw` holds the text without quotes.
    String,

    /// Boundary of a single-quoted template string. Emitted once at the
    /// opening quote and once after the closing quote, always with empty raw.
    TemplateString,

    /// `true` or `false`
    Bool,

    /// Identifier that is neither a boolean nor a keyword
    Ident,

    // Operators
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `/`
    Div,
    /// `*`
    Mul,
    /// `%`
    Mod,
    /// `++`, string concatenation or list merge depending on the operands
    Merge,

    // Delimiters
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `(`
    LeftBrace,
    /// `)`
    RightBrace,
    /// `{`
    LeftCurly,
    /// `}`
    RightCurly,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `_`
    Param,

    // Keywords
    Let,
    Function,
    If,
    For,
    Match,
    Return,
    And,
    Or,
    Not,

    /// End of input. Always the last token of a scan.
    Eof,
}

impl TokenKind {
    /// Looks up an identifier in the keyword table.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "let" => TokenKind::Let,
            "fun" => TokenKind::Function,
            "if" => TokenKind::If,
            "for" => TokenKind::For,
            "match" => TokenKind::Match,
            "return" => TokenKind::Return,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }

    /// Human readable name, used in token dumps and parser messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::TemplateString => "TEMPLATE_STRING",
            TokenKind::Bool => "BOOL",
            TokenKind::Ident => "IDENT",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Div => "/",
            TokenKind::Mul => "*",
            TokenKind::Mod => "%",
            TokenKind::Merge => "++",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::LeftBrace => "(",
            TokenKind::RightBrace => ")",
            TokenKind::LeftCurly => "{",
            TokenKind::RightCurly => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Param => "_",
            TokenKind::Let => "let",
            TokenKind::Function => "fun",
            TokenKind::If => "if",
            TokenKind::For => "for",
            TokenKind::Match => "match",
            TokenKind::Return => "return",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical token.
///
/// Tokens are immutable once the lexer has produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Byte offset of the first byte of the token in the source
    pub position: usize,
    /// 0-based line number
    pub line: usize,
    pub kind: TokenKind,
    /// Literal text of the token (string contents without quotes)
    pub raw: String,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>, position: usize, line: usize) -> Self {
        Token {
            position,
            line,
            kind,
            raw: raw.into(),
        }
    }

    /// The end-of-input sentinel.
    pub fn eof(position: usize, line: usize) -> Self {
        Token::new(TokenKind::Eof, "", position, line)
    }
}
