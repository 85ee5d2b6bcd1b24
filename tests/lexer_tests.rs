// tests/lexer_tests.rs

use pretty_assertions::assert_eq;
use sophia_lang::{Diagnostic, DiagnosticKind, Lexer, Token, TokenKind};

fn lex(input: &str) -> (Vec<Token>, Vec<Diagnostic>, bool) {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut lexer = Lexer::new(input.as_bytes());
    let tokens = lexer.lex(&mut diagnostics);
    (tokens, diagnostics, lexer.has_error())
}

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).0.iter().map(|t| t.kind).collect()
}

fn raws(input: &str) -> Vec<String> {
    lex(input).0.into_iter().map(|t| t.raw).collect()
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("+", TokenKind::Add),
        ("-", TokenKind::Sub),
        ("/", TokenKind::Div),
        ("*", TokenKind::Mul),
        ("%", TokenKind::Mod),
        ("(", TokenKind::LeftBrace),
        (")", TokenKind::RightBrace),
        ("{", TokenKind::LeftCurly),
        ("}", TokenKind::RightCurly),
        ("[", TokenKind::LeftBracket),
        ("]", TokenKind::RightBracket),
        (":", TokenKind::Colon),
        (".", TokenKind::Dot),
        ("_", TokenKind::Param),
    ];

    for (input, expected) in test_cases {
        let (tokens, diagnostics, has_error) = lex(input);
        assert!(!has_error, "Failed for input: {}", input);
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 2, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, expected, "Failed for input: {}", input);
        assert_eq!(tokens[0].raw, input);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

// ============================================================================
// Merge vs Add
// ============================================================================

#[test]
fn test_merge_operator() {
    assert_eq!(kinds("++"), vec![TokenKind::Merge, TokenKind::Eof]);
    assert_eq!(raws("++"), vec!["++".to_string(), String::new()]);
}

#[test]
fn test_lone_plus_is_add() {
    assert_eq!(kinds("+ 1"), vec![TokenKind::Add, TokenKind::Float, TokenKind::Eof]);
    assert_eq!(kinds("+"), vec![TokenKind::Add, TokenKind::Eof]);
    assert_eq!(kinds("+ +"), vec![TokenKind::Add, TokenKind::Add, TokenKind::Eof]);
}

#[test]
fn test_merge_is_greedy() {
    assert_eq!(kinds("+++"), vec![TokenKind::Merge, TokenKind::Add, TokenKind::Eof]);
    assert_eq!(kinds("++++"), vec![TokenKind::Merge, TokenKind::Merge, TokenKind::Eof]);
}

// ============================================================================
// Identifiers, Booleans and Keywords
// ============================================================================

#[test]
fn test_identifiers() {
    let test_cases = vec!["x", "foo", "bar123", "snake_case", "camelCase", "a1b2c3", "héllo"];

    for input in test_cases {
        let (tokens, _, has_error) = lex(input);
        assert!(!has_error);
        assert_eq!(tokens[0].kind, TokenKind::Ident, "Failed for input: {}", input);
        assert_eq!(tokens[0].raw, input);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

#[test]
fn test_booleans() {
    assert_eq!(kinds("true false"), vec![TokenKind::Bool, TokenKind::Bool, TokenKind::Eof]);
    assert_eq!(kinds("truth"), vec![TokenKind::Ident, TokenKind::Eof]);
}

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("let", TokenKind::Let),
        ("fun", TokenKind::Function),
        ("if", TokenKind::If),
        ("for", TokenKind::For),
        ("match", TokenKind::Match),
        ("return", TokenKind::Return),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("not", TokenKind::Not),
    ];

    for (input, expected) in test_cases {
        assert_eq!(kinds(input), vec![expected, TokenKind::Eof], "Failed for input: {}", input);
    }
}

#[test]
fn test_keywords_vs_identifiers() {
    for input in ["letter", "android", "format", "iffy", "nothing"] {
        assert_eq!(kinds(input), vec![TokenKind::Ident, TokenKind::Eof], "Failed for input: {}", input);
    }
}

#[test]
fn test_underscore_starts_param_not_identifier() {
    assert_eq!(kinds("_x"), vec![TokenKind::Param, TokenKind::Ident, TokenKind::Eof]);
    assert_eq!(raws("x_1"), vec!["x_1".to_string(), String::new()]);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    for input in ["0", "42", "3.14", "1_000", "1e10", "1e-3"] {
        let (tokens, _, has_error) = lex(input);
        assert!(!has_error);
        assert_eq!(tokens[0].kind, TokenKind::Float, "Failed for input: {}", input);
        assert_eq!(tokens[0].raw, input);
        assert_eq!(tokens.len(), 2);
    }
}

#[test]
fn test_malformed_numbers_are_accepted() {
    for input in ["1.2.3", "1e", "1--2", "3_._e"] {
        let (tokens, diagnostics, has_error) = lex(input);
        assert!(!has_error, "Failed for input: {}", input);
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Float);
        assert_eq!(tokens[0].raw, input);
    }
}

#[test]
fn test_number_stops_at_other_characters() {
    assert_eq!(raws("12abc"), vec!["12".to_string(), "abc".to_string(), String::new()]);
    assert_eq!(kinds("1e5x"), vec![TokenKind::Float, TokenKind::Ident, TokenKind::Eof]);
}

#[test]
fn test_only_ascii_digits_start_numbers() {
    for input in ["½", "²", "٣"] {
        let (tokens, diagnostics, has_error) = lex(input);
        assert!(has_error, "Failed for input: {}", input);
        assert_eq!(tokens.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownToken);
        assert_eq!(diagnostics[0].text, input);
    }

    let (_, diagnostics, _) = lex("1²");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].text, "²");
    assert_eq!(diagnostics[0].column, 1);
}

// ============================================================================
// Whitespace, Lines and Comments
// ============================================================================

#[test]
fn test_empty_and_whitespace_input() {
    for input in ["", " ", "\n\n", " \t\r\n "] {
        let (tokens, diagnostics, has_error) = lex(input);
        assert!(!has_error, "Failed for input: {:?}", input);
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}

#[test]
fn test_line_numbers() {
    let (tokens, _, _) = lex("a\nb\n\nc");
    let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![0, 1, 3, 3]);
}

#[test]
fn test_positions_are_byte_offsets() {
    let (tokens, _, _) = lex("(++ 1)");
    let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![0, 1, 4, 5, 6]);

    let (tokens, _, _) = lex("é x");
    assert_eq!(tokens[1].position, 3);
}

#[test]
fn test_comments() {
    assert_eq!(kinds(";; a comment\na"), vec![TokenKind::Ident, TokenKind::Eof]);
    assert_eq!(kinds("a ;; trailing $ @ unknowns"), vec![TokenKind::Ident, TokenKind::Eof]);
}

#[test]
fn test_single_semicolon_is_unknown() {
    let (tokens, diagnostics, has_error) = lex("; a");
    assert!(has_error);
    assert_eq!(tokens.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownToken);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_double_quoted_string() {
    let (tokens, _, has_error) = lex("\"hello world\"");
    assert!(!has_error);
    assert_eq!(tokens[0], Token::new(TokenKind::String, "hello world", 0, 0));
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_empty_string() {
    let (tokens, _, has_error) = lex("\"\"");
    assert!(!has_error);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].raw, "");
}

#[test]
fn test_unterminated_string() {
    let (tokens, diagnostics, has_error) = lex("\"abc");

    assert!(has_error);
    assert_eq!(tokens, vec![Token::eof(4, 0)]);
    assert_eq!(diagnostics.len(), 1);

    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnterminatedString);
    assert_eq!(diagnostic.text, "abc");
    assert_eq!(diagnostic.width, 3);
    assert_eq!(diagnostic.to_string(), "err: Unterminated String at [l 1:2]");
    assert_eq!(diagnostic.excerpt, "\n001 |\t\"abc\n\t ^^^\n\n");
}

#[test]
fn test_string_stops_at_newline() {
    let (tokens, diagnostics, has_error) = lex("\"ab\nc\"");
    assert!(has_error);
    assert_eq!(tokens.len(), 1);
    // The quote on the second line opens another unterminated string.
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].line, 0);
    assert_eq!(diagnostics[1].line, 1);
}

// ============================================================================
// Template Strings
// ============================================================================

#[test]
fn test_template_string_interpolation() {
    let (tokens, _, has_error) = lex("'hello {name}!'");
    assert!(!has_error);

    let got: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.raw.as_str())).collect();
    assert_eq!(
        got,
        vec![
            (TokenKind::TemplateString, ""),
            (TokenKind::String, "hello "),
            (TokenKind::Ident, "name"),
            (TokenKind::String, "!"),
            (TokenKind::TemplateString, ""),
            (TokenKind::Eof, ""),
        ]
    );
    assert_eq!(tokens[1].position, 1);
    assert_eq!(tokens[2].position, 8);
}

#[test]
fn test_template_adjacent_interpolations() {
    assert_eq!(
        kinds("'{a}{b}'"),
        vec![
            TokenKind::TemplateString,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::TemplateString,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_template_closing_brace_is_not_checked() {
    let (tokens, _, has_error) = lex("'x}y'");
    assert!(!has_error);
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].raw, "xy");
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_template_brace_without_identifier() {
    let (tokens, _, has_error) = lex("'{ x}'");
    assert!(!has_error);
    let got: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.raw.as_str())).collect();
    assert_eq!(
        got,
        vec![
            (TokenKind::TemplateString, ""),
            (TokenKind::Ident, ""),
            (TokenKind::String, " x"),
            (TokenKind::TemplateString, ""),
            (TokenKind::Eof, ""),
        ]
    );

    // The empty identifier has no spelling of its own.
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_unterminated_template_string() {
    let (tokens, diagnostics, has_error) = lex("'abc{x");

    assert!(has_error);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnterminatedTemplate);
    assert_eq!(diagnostics[0].to_string(), "err: Unexpected Newline or EOF at [l 1:7]");
}

#[test]
fn test_template_string_with_newline() {
    let (tokens, diagnostics, has_error) = lex("'abc\ndef'");
    assert!(has_error);
    assert_eq!(tokens.len(), 1);
    assert_eq!(diagnostics.len(), 1);
}

// ============================================================================
// Unknown Tokens and Diagnostics
// ============================================================================

#[test]
fn test_unknown_token() {
    let (tokens, diagnostics, has_error) = lex("$");

    assert!(has_error);
    assert_eq!(tokens, vec![Token::eof(1, 0)]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].to_string(), "err: Unknown token '$' at [l 1:1]");
    assert_eq!(diagnostics[0].excerpt, "\n001 |\t$\n\t^\n\n");
}

#[test]
fn test_every_unknown_token_is_reported() {
    let (tokens, diagnostics, has_error) = lex("$ 1 @ # ~");
    assert!(has_error);
    assert_eq!(tokens.len(), 1);
    let texts: Vec<&str> = diagnostics.iter().map(|d| d.text.as_str()).collect();
    assert_eq!(texts, vec!["$", "@", "#", "~"]);
}

#[test]
fn test_diagnostic_on_second_line_shows_previous_line() {
    let (_, diagnostics, _) = lex("(++ \"a\"\n\"b\" $)");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line, 1);
    assert_eq!(diagnostics[0].column, 4);
    assert_eq!(diagnostics[0].to_string(), "err: Unknown token '$' at [l 2:5]");
    assert_eq!(diagnostics[0].excerpt, "\n001 |\t(++ \"a\"\n002 |\t\"b\" $)\n\t    ^\n\n");
}

#[test]
fn test_full_expression() {
    assert_eq!(
        kinds("(++ \"a\" [1 2.5] true) ;; done"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Merge,
            TokenKind::String,
            TokenKind::LeftBracket,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::RightBracket,
            TokenKind::Bool,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}
