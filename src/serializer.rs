//! Canonical JSON serialization.
//!
//! Walks a [`Value`] tree top-down and emits compact canonical text
//! through a [`Printer`], the external output capability. Object members
//! emit in insertion order, so `parse` followed by `serialize` is
//! deterministic.

use std::fmt::{self, Write};

use crate::value::{Number, Value};

/// Output capability consumed by the serializer.
///
/// A printer accepts character data and emits it to some sink; the
/// serializer is agnostic to what that sink is. Every [`std::fmt::Write`]
/// implementor is a printer, so `String`, formatters and custom sinks all
/// work unchanged. A sink-side failure propagates out of
/// [`serialize_to`] as-is.
pub trait Printer {
    /// Emit a string fragment.
    fn print_str(&mut self, fragment: &str) -> fmt::Result;

    /// Emit a single character.
    fn print_char(&mut self, c: char) -> fmt::Result {
        let mut buf = [0u8; 4];
        self.print_str(c.encode_utf8(&mut buf))
    }
}

impl<W: Write + ?Sized> Printer for W {
    fn print_str(&mut self, fragment: &str) -> fmt::Result {
        self.write_str(fragment)
    }

    fn print_char(&mut self, c: char) -> fmt::Result {
        self.write_char(c)
    }
}

/// Render a value as a compact canonical JSON string.
pub fn serialize(value: &Value) -> String {
    let mut output = String::new();
    // Printing into a String cannot fail.
    let _ = serialize_to(value, &mut output);
    output
}

/// Render a value through the given printer.
pub fn serialize_to<P: Printer + ?Sized>(value: &Value, out: &mut P) -> fmt::Result {
    match value {
        Value::Null => out.print_str("null"),
        Value::Bool(true) => out.print_str("true"),
        Value::Bool(false) => out.print_str("false"),
        Value::Number(n) => print_number(n, out),
        Value::String(s) => print_string(s, out),
        Value::Array(elements) => print_array(elements, out),
        Value::Object(members) => print_object(members, out),
    }
}

/// Emit a number in its shortest round-trip decimal form.
///
/// Integers render as plain decimal. Floats use the shortest
/// representation that re-parses to the identical bit pattern, kept in
/// float-typed text (`.0` appended when no fraction or exponent survives
/// formatting) so classification is stable across a round trip. A
/// non-finite float cannot be expressed in JSON text and renders as
/// `null`; parser output is always finite.
fn print_number<P: Printer + ?Sized>(number: &Number, out: &mut P) -> fmt::Result {
    match number {
        Number::Int(n) => out.print_str(&n.to_string()),
        Number::Float(f) if !f.is_finite() => out.print_str("null"),
        Number::Float(f) => {
            let mut repr = f.to_string();
            if !repr.contains(['.', 'e', 'E']) {
                repr.push_str(".0");
            }
            out.print_str(&repr)
        }
    }
}

/// Emit a string with JSON escaping re-applied.
///
/// Escapes `"`, `\` and control characters below 0x20; everything else
/// passes through as UTF-8 with no forced `\uXXXX` expansion.
fn print_string<P: Printer + ?Sized>(s: &str, out: &mut P) -> fmt::Result {
    out.print_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => out.print_str("\\\"")?,
            '\\' => out.print_str("\\\\")?,
            '\u{0008}' => out.print_str("\\b")?,
            '\u{000C}' => out.print_str("\\f")?,
            '\n' => out.print_str("\\n")?,
            '\r' => out.print_str("\\r")?,
            '\t' => out.print_str("\\t")?,
            c if c < '\u{0020}' => {
                out.print_str(&format!("\\u{:04x}", c as u32))?;
            }
            c => out.print_char(c)?,
        }
    }
    out.print_char('"')
}

/// Emit an array.
fn print_array<P: Printer + ?Sized>(elements: &[Value], out: &mut P) -> fmt::Result {
    out.print_char('[')?;
    for (i, value) in elements.iter().enumerate() {
        if i > 0 {
            out.print_char(',')?;
        }
        serialize_to(value, out)?;
    }
    out.print_char(']')
}

/// Emit an object in insertion order.
fn print_object<P: Printer + ?Sized>(members: &[(String, Value)], out: &mut P) -> fmt::Result {
    out.print_char('{')?;
    for (i, (key, value)) in members.iter().enumerate() {
        if i > 0 {
            out.print_char(',')?;
        }
        print_string(key, out)?;
        out.print_char(':')?;
        serialize_to(value, out)?;
    }
    out.print_char('}')
}
