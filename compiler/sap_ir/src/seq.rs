//! The sole composite value shape.
//!
//! All program structure — nested S-expressions, classifier output, the
//! per-file root — is built from sequences of sequences. A `Seq` owns its
//! elements by value and keeps no parent back-reference, so the shape is a
//! tree by construction: there is no API through which a sequence can end
//! up inside itself.
//!
//! # Total Accessors
//!
//! Tree-walking code stays branch-free because access never fails:
//! out-of-range indexing yields the absence value and an invalid range
//! yields an empty sequence.

use std::fmt;

use crate::Value;

/// An ordered, mutable, growable container of values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Seq {
    items: Vec<Value>,
}

impl Seq {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Seq { items: Vec::new() }
    }

    /// Append a value.
    #[inline]
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow an element, or `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Indexed access as a total function: out-of-range yields the absence
    /// value rather than failing.
    #[inline]
    pub fn at(&self, index: usize) -> Value {
        self.items.get(index).cloned().unwrap_or(Value::None)
    }

    /// A new sequence holding the `start..end` elements.
    ///
    /// Invalid bounds (reversed or past the end) yield an empty sequence.
    pub fn range(&self, start: usize, end: usize) -> Seq {
        match self.items.get(start..end) {
            Some(slice) => Seq {
                items: slice.to_vec(),
            },
            None => Seq::new(),
        }
    }

    /// First element, if any.
    #[inline]
    pub fn head(&self) -> Option<&Value> {
        self.items.first()
    }

    /// Everything after the first element (empty for sequences of length
    /// zero or one).
    #[inline]
    pub fn rest(&self) -> &[Value] {
        self.items.get(1..).unwrap_or(&[])
    }

    /// All elements as a slice.
    #[inline]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Iterate over elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// The head identifier's name, when the sequence is head-tagged
    /// (classifier output like `slice-type` or the `file` unit).
    pub fn tag(&self) -> Option<&str> {
        match self.items.first() {
            Some(Value::Ident(name)) => Some(name),
            _ => None,
        }
    }
}

impl From<Vec<Value>> for Seq {
    fn from(items: Vec<Value>) -> Self {
        Seq { items }
    }
}

impl<'a> IntoIterator for &'a Seq {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str(")")
    }
}
