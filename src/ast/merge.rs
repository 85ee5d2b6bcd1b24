use crate::{
    ast::{node::compile_operand, Node, Token},
    value::Value,
};

/// The `++` operator.
///
/// Concatenates when every operand evaluates to a string, otherwise merges
/// the operands into one list, splicing list operands one level deep.
///
/// # Examples
///
/// ```text
/// (++ "a" "b" "c")      => "abc"
/// (++ 1 [2 3] "x")      => [1, 2, 3, "x"]
/// (++ [1 [2]] [3])      => [1, [2], 3]
/// (++)                  => null
/// ```
#[derive(Debug)]
pub struct Merge {
    pub token: Token,
    pub children: Vec<Box<dyn Node>>,
}

impl Merge {
    pub fn new(token: Token, children: Vec<Box<dyn Node>>) -> Self {
        Merge { token, children }
    }
}

impl Node for Merge {
    fn token(&self) -> &Token {
        &self.token
    }

    fn eval(&self) -> Value {
        if self.children.is_empty() {
            return Value::Null;
        }

        // Children are evaluated strictly left to right.
        let mut values = Vec::with_capacity(self.children.len());
        let mut all_strings = true;
        for child in &self.children {
            let value = child.eval();
            if !matches!(value, Value::String(_)) {
                all_strings = false;
            }
            values.push(value);
        }

        if all_strings {
            let mut result = String::new();
            for value in &values {
                if let Value::String(s) = value {
                    result.push_str(s);
                }
            }
            return Value::String(result);
        }

        let mut merged = Vec::new();
        for value in values {
            match value {
                Value::Array(items) => merged.extend(items),
                other => merged.push(other),
            }
        }
        Value::Array(merged)
    }

    fn compile_js(&self, out: &mut String) {
        if self.children.is_empty() {
            tracing::debug!(
                line = self.token.line + 1,
                "opt: removed illogical '++' expression containing no children"
            );
            return;
        }

        out.push_str("[].concat(");
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            compile_operand(child.as_ref(), out);
        }
        out.push(')');
    }
}
