use crate::{ast::Node, value::Value};

/// Interprets a syntax tree.
///
/// # Examples
///
/// ```
/// use sophia_lang::{Diagnostic, Evaluator, Lexer, Parser, Value};
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let mut lexer = Lexer::new(b"(++ \"a\" \"b\" \"c\")");
/// let tokens = lexer.lex(&mut diagnostics);
/// let parsed = Parser::new(tokens, lexer.source()).parse(&mut diagnostics);
///
/// let result = Evaluator::new().eval(parsed.root.as_deref());
/// assert_eq!(result, Value::String("abc".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates the tree rooted at `root`. An empty program is `Null`.
    pub fn eval(&self, root: Option<&dyn Node>) -> Value {
        match root {
            Some(node) => {
                tracing::debug!(line = node.token().line + 1, "evaluating");
                node.eval()
            }
            None => Value::Null,
        }
    }
}
