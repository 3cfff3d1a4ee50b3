//! The JSON value tree.
//!
//! [`Value`] is a closed variant over the six JSON types. Containers own
//! their children exclusively (`Vec` provides the heap indirection the
//! recursive arms require), so a tree is a strict ownership hierarchy with
//! no sharing and no back-references.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// A JSON number.
///
/// The two arms preserve the lexical classification of the source literal:
/// a plain integral lexeme within `i64` range is [`Int`](Number::Int), and
/// anything written with a fraction or exponent (or out of `i64` range) is
/// [`Float`](Number::Float). `Int(5)` and `Float(5.0)` compare unequal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer written in plain decimal form.
    Int(i64),
    /// Floating-point number, always finite in parser output.
    Float(f64),
}

impl Number {
    /// Resolve a number lexeme produced by the scanner.
    ///
    /// Attempts a strict integer conversion first; a lexeme containing
    /// `.`, `e` or `E`, or one that overflows `i64`, falls back to a
    /// floating-point conversion. Returns `None` when the floating-point
    /// value is not finite (the caller reports a malformed number).
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        let integral_form = !lexeme.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));
        if integral_form {
            if let Ok(n) = lexeme.parse::<i64>() {
                return Some(Number::Int(n));
            }
        }
        match lexeme.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(Number::Float(f)),
            _ => None,
        }
    }

    /// Returns true if this number is the integer arm.
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Returns the integer value, if this is the integer arm.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(*n),
            Number::Float(_) => None,
        }
    }

    /// Returns the numeric value as an `f64`, converting the integer arm.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(f) => *f,
        }
    }
}

/// A JSON value.
///
/// Objects preserve insertion order; duplicate keys resolve to the last
/// occurrence at the position of the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null literal.
    #[default]
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string, with escapes already decoded.
    String(String),
    /// JSON array of values.
    Array(Vec<Value>),
    /// JSON object as insertion-ordered key/value pairs.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a Number, None otherwise.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the integer value if this is an integer-armed Number.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// Returns the numeric value as `f64` if this is a Number.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the members if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(elements) => elements.get(index),
            _ => None,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    /// Renders the canonical compact form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::serializer::serialize_to(self, f)
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
