use std::fmt;

/// A runtime value produced by interpreting a syntax tree.
///
/// # Examples
///
/// ```
/// use sophia_lang::Value;
///
/// let absent = Value::Null;
/// let boolean = Value::Boolean(true);
/// let number = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
/// let list = Value::Array(vec![Value::Float(1.0), Value::String("x".into())]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value, e.g. the result of `(++)`
    Null,

    Boolean(bool),

    /// All numbers are floating point
    Float(f64),

    String(String),

    /// Ordered list of values, possibly of mixed types
    Array(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::output::to_json(self))
    }
}
