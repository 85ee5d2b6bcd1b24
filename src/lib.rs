pub mod ast;
pub mod cli;
pub mod compiler;
pub mod diagnostics;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{Merge, Node, Token, TokenKind};
pub use compiler::Compiler;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, LogSink};
pub use evaluator::Evaluator;
pub use lexer::Lexer;
pub use output::{to_json, to_json_pretty};
pub use parser::{Parsed, Parser};
pub use value::Value;
