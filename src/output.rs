//! JSON-style rendering of runtime values.
//!
//! Used by the REPL and the `run` command to print results, in either a
//! compact form via [`to_json()`] or a 2-space indented form via
//! [`to_json_pretty()`].
//!
//! # Examples
//!
//! ```
//! use sophia_lang::Value;
//! use sophia_lang::output::{to_json, to_json_pretty};
//!
//! let value = Value::Array(vec![Value::Float(1.0), Value::String("x".into())]);
//!
//! assert_eq!(to_json(&value), r#"[1,"x"]"#);
//! assert_eq!(to_json_pretty(&value), "[\n  1,\n  \"x\"\n]");
//! ```

use crate::value::Value;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, 0);
        out
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            // JSON has no spelling for NaN or the infinities
            Value::Float(n) if !n.is_finite() => out.push_str("null"),
            Value::Float(n) => out.push_str(&n.to_string()),
            Value::String(s) => write_string(out, s),
            Value::Array(items) => self.write_array(out, items, depth),
        }
    }

    fn write_array(&self, out: &mut String, items: &[Value], depth: usize) {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if self.pretty {
                newline(out, depth + 1);
            }
            self.write_value(out, item, depth + 1);
        }
        if self.pretty && !items.is_empty() {
            newline(out, depth);
        }
        out.push(']');
    }
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Renders a value as compact JSON.
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Renders a value as JSON with 2-space indentation, one element per line.
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
