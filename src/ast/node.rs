use std::fmt;

use crate::{ast::Token, value::Value};

/// Capabilities every syntax-tree node provides.
///
/// A node owns its children and the token it was parsed from. Trees are built
/// once by the parser and never mutated afterwards.
pub trait Node: fmt::Debug {
    /// The token this node originates from, for diagnostics.
    fn token(&self) -> &Token;

    /// Interprets the node and returns its runtime value.
    fn eval(&self) -> Value;

    /// Appends an equivalent JavaScript expression to `out`.
    fn compile_js(&self, out: &mut String);
}

/// Compiles `child` as one operand of a comma-separated JavaScript list.
///
/// A child that emits nothing (an empty merge) stands in as `null`, which is
/// also what it evaluates to.
pub(crate) fn compile_operand(child: &dyn Node, out: &mut String) {
    let start = out.len();
    child.compile_js(out);
    if out.len() == start {
        out.push_str("null");
    }
}
