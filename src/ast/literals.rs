//! Leaf nodes and list literals.

use crate::{
    ast::{node::compile_operand, Node, Token},
    value::Value,
};

/// String literal
#[derive(Debug)]
pub struct Str {
    pub token: Token,
    pub value: String,
}

impl Node for Str {
    fn token(&self) -> &Token {
        &self.token
    }

    fn eval(&self) -> Value {
        Value::String(self.value.clone())
    }

    fn compile_js(&self, out: &mut String) {
        // JSON string escaping is valid JavaScript string literal syntax.
        out.push_str(&serde_json::Value::String(self.value.clone()).to_string());
    }
}

/// Numeric literal
#[derive(Debug)]
pub struct Float {
    pub token: Token,
    pub value: f64,
}

impl Node for Float {
    fn token(&self) -> &Token {
        &self.token
    }

    fn eval(&self) -> Value {
        Value::Float(self.value)
    }

    fn compile_js(&self, out: &mut String) {
        if self.value.is_infinite() {
            out.push_str(if self.value > 0.0 { "Infinity" } else { "-Infinity" });
        } else {
            out.push_str(&self.value.to_string());
        }
    }
}

/// Boolean literal
#[derive(Debug)]
pub struct Bool {
    pub token: Token,
    pub value: bool,
}

impl Node for Bool {
    fn token(&self) -> &Token {
        &self.token
    }

    fn eval(&self) -> Value {
        Value::Boolean(self.value)
    }

    fn compile_js(&self, out: &mut String) {
        out.push_str(if self.value { "true" } else { "false" });
    }
}

/// List literal, `[a b c]`
#[derive(Debug)]
pub struct List {
    pub token: Token,
    pub children: Vec<Box<dyn Node>>,
}

impl Node for List {
    fn token(&self) -> &Token {
        &self.token
    }

    fn eval(&self) -> Value {
        Value::Array(self.children.iter().map(|child| child.eval()).collect())
    }

    fn compile_js(&self, out: &mut String) {
        out.push('[');
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            compile_operand(child.as_ref(), out);
        }
        out.push(']');
    }
}
