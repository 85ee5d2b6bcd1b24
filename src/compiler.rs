use crate::ast::Node;

/// Transpiles a syntax tree to JavaScript.
///
/// # Examples
///
/// ```
/// use sophia_lang::{Compiler, Diagnostic, Lexer, Parser};
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let mut lexer = Lexer::new(b"(++ [1 2] \"x\")");
/// let tokens = lexer.lex(&mut diagnostics);
/// let parsed = Parser::new(tokens, lexer.source()).parse(&mut diagnostics);
///
/// let js = Compiler::new().compile(parsed.root.as_deref());
/// assert_eq!(js, r#"[].concat([1,2],"x")"#);
/// ```
#[derive(Debug, Default)]
pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Self
    }

    /// Returns the JavaScript expression for the tree. An empty program, or a
    /// root whose emission is elided, compiles to the empty string.
    pub fn compile(&self, root: Option<&dyn Node>) -> String {
        let mut out = String::new();
        if let Some(node) = root {
            node.compile_js(&mut out);
        }
        tracing::debug!(bytes = out.len(), "compilation finished");
        out
    }
}
