//! Shared-immutable heap wrapper for value payloads.
//!
//! `Heap<T>` wraps `Rc<T>` with a constructor private to this crate, so all
//! heap allocations go through `Value` factory methods. Payloads are
//! immutable once allocated; mutation happens by building a new value, which
//! is what keeps sequences trees rather than graphs.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Reference-counted, immutable payload storage for [`Value`](crate::Value).
///
/// Cloning a `Heap<T>` bumps a reference count; it never copies the payload.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    /// Allocate a payload. Crate-private: use `Value` factory methods.
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        // Pointer equality is a cheap fast path before comparing payloads.
        Rc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clone_shares_payload() {
        let a = Heap::new(String::from("hello"));
        let b = a.clone();
        assert_eq!(&*a, &*b);
        assert!(Rc::ptr_eq(&a.0, &b.0));
    }

    #[test]
    fn eq_compares_payloads_across_allocations() {
        let a = Heap::new(String::from("x"));
        let b = Heap::new(String::from("x"));
        assert_eq!(a, b);
    }
}
