//! The universal object of the front end.
//!
//! Every entity the parser produces and the evaluator manipulates is a
//! `Value`. Leaves evaluate to themselves, identifiers by scope lookup,
//! sequences through the call/apply protocol — but evaluation itself lives
//! in the evaluator crate; this module only defines the shapes and their
//! textual rendering.

use std::fmt;

use crate::{Callable, Heap, ScopeRef, Seq};

/// A symbolic value.
///
/// Callability is a capability, not a closed class of "function" values:
/// any value may be (or resolve to) a [`Callable`], which is what lets
/// special forms live in the scope chain instead of in the evaluator.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absence. Also the result of evaluating a sequence whose head is not
    /// callable.
    None,
    /// Boolean literal.
    Bool(bool),
    /// 64-bit signed integer literal.
    Int(i64),
    /// 64-bit float literal.
    Float(f64),
    /// A single code point, distinct from a one-character string.
    Rune(char),
    /// UTF-8 text.
    Str(Heap<String>),
    /// A bare symbolic name. Identifiers are immutable; scope mutation only
    /// ever changes the mapping a name resolves through.
    Ident(Heap<String>),
    /// The sole composite shape.
    Seq(Seq),
    /// A scope used as ordinary program data (a generic mutable mapping).
    Env(ScopeRef),
    /// The apply capability.
    Callable(Callable),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an identifier.
    #[inline]
    pub fn ident(name: impl Into<String>) -> Self {
        Value::Ident(Heap::new(name.into()))
    }

    /// Create a sequence value from its elements.
    #[inline]
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Seq::from(items))
    }

    /// Returns `true` for the absence value.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Borrow the identifier name, if this is an identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Value::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Borrow the sequence, if this is one.
    pub fn as_seq(&self) -> Option<&Seq> {
        match self {
            Value::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    /// Elements as a slice; total over non-sequences (empty slice).
    ///
    /// Models the original's nil-safe access on a possibly-absent sequence
    /// as a total function instead of null-safe dispatch.
    pub fn items(&self) -> &[Value] {
        match self {
            Value::Seq(seq) => seq.items(),
            _ => &[],
        }
    }

    /// Indexed access, total over every shape: non-sequences and
    /// out-of-range indices yield the absence value.
    pub fn at(&self, index: usize) -> Value {
        match self {
            Value::Seq(seq) => seq.at(index),
            _ => Value::None,
        }
    }

    /// Short name of this value's shape, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Rune(_) => "rune",
            Value::Str(_) => "string",
            Value::Ident(_) => "identifier",
            Value::Seq(_) => "sequence",
            Value::Env(_) => "scope",
            Value::Callable(_) => "callable",
        }
    }
}

/// Write a string literal in surface form.
///
/// Only the quote character is escaped, mirroring the classifier's
/// deliberately asymmetric escape rule: any other backslash in the payload
/// is already literal and round-trips as-is.
fn write_string_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        if ch == '"' {
            f.write_str("\\\"")?;
        } else {
            write!(f, "{ch}")?;
        }
    }
    f.write_str("\"")
}

/// Write a rune literal in surface form, using the single-letter escapes
/// the classifier understands.
fn write_rune_literal(f: &mut fmt::Formatter<'_>, ch: char) -> fmt::Result {
    let escaped = match ch {
        '\n' => Some("\\n"),
        '\t' => Some("\\t"),
        '\r' => Some("\\r"),
        '\u{7}' => Some("\\a"),
        '\u{8}' => Some("\\b"),
        '\u{c}' => Some("\\f"),
        '\u{b}' => Some("\\v"),
        '\'' => Some("\\'"),
        '\\' => Some("\\\\"),
        _ => None,
    };
    match escaped {
        Some(esc) => write!(f, "'{esc}'"),
        None => write!(f, "'{ch}'"),
    }
}

impl fmt::Display for Value {
    /// Render the textual (surface) form of the value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // {:?} picks the shortest representation that parses back to
            // the same f64, which is what classification idempotence needs.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Rune(ch) => write_rune_literal(f, *ch),
            Value::Str(s) => write_string_literal(f, s),
            Value::Ident(name) => f.write_str(name),
            Value::Seq(seq) => write!(f, "{seq}"),
            Value::Env(_) => f.write_str("#<scope>"),
            Value::Callable(c) => write!(f, "#<callable {}>", c.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaves_render_surface_forms() {
        assert_eq!(Value::None.to_string(), "nil");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::ident("foo").to_string(), "foo");
    }

    #[test]
    fn strings_render_quoted_with_escaped_quotes() {
        assert_eq!(Value::string("a\"b").to_string(), "\"a\\\"b\"");
        assert_eq!(Value::string("plain").to_string(), "\"plain\"");
    }

    #[test]
    fn runes_render_with_escapes() {
        assert_eq!(Value::Rune('x').to_string(), "'x'");
        assert_eq!(Value::Rune('\n').to_string(), "'\\n'");
        assert_eq!(Value::Rune('\\').to_string(), "'\\\\'");
    }

    #[test]
    fn total_access_on_non_sequences() {
        assert_eq!(Value::Int(1).at(0), Value::None);
        assert!(Value::string("x").items().is_empty());
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Int(0).type_name(), "int");
        assert_eq!(Value::seq(vec![]).type_name(), "sequence");
    }
}
