//! Lexical environment chain.
//!
//! A scope is a name-to-value mapping with an optional parent. Lookup walks
//! the chain; store and delete act on the local mapping only and never
//! mutate an ancestor. A root scope (no parent) is created once per
//! compilation pass and acts as the builtin table; local scopes are created
//! per nested context (file, block) and dropped with it.
//!
//! Iteration over a scope's own bindings is a synchronous snapshot, sorted
//! by name for within-run determinism. A consumer that abandons a snapshot
//! halfway abandons a `Vec`, nothing more — there is no producer task to
//! leak, by construction.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Value;

/// A single scope containing bindings.
#[derive(Debug, Default)]
pub struct Scope {
    /// Own bindings (`FxHashMap` for faster hashing with string keys).
    bindings: FxHashMap<String, Value>,
    /// Parent scope, for lexical delegation on lookup miss.
    parent: Option<ScopeRef>,
}

impl Scope {
    /// Create a root scope with no parent.
    pub fn new() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    /// Create a local scope delegating to `parent`.
    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Look up a name, delegating to the parent on miss.
    ///
    /// `None` is the explicit not-found signal; how to react to it is the
    /// caller's (pass-specific) decision.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.lookup(name))
    }

    /// Bind a name in this scope only.
    #[inline]
    pub fn store(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Remove a name from this scope only. Returns `true` if it was bound.
    pub fn delete(&mut self, name: &str) -> bool {
        self.bindings.remove(name).is_some()
    }

    /// Snapshot of this scope's own bindings, sorted by name.
    ///
    /// Parent bindings are deliberately excluded; module-boundary merges
    /// export exactly what a scope itself defines.
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut entries: Vec<(String, Value)> = self
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// Shared handle to a scope.
///
/// Wraps `Rc<RefCell<Scope>>`; all scope allocation goes through
/// [`ScopeRef::new_root`] and [`ScopeRef::child`]. Not thread-safe;
/// evaluation is single-threaded per compilation pass.
#[derive(Clone)]
pub struct ScopeRef(Rc<RefCell<Scope>>);

impl ScopeRef {
    /// Create a fresh root scope.
    pub fn new_root() -> Self {
        ScopeRef(Rc::new(RefCell::new(Scope::new())))
    }

    /// Create a local scope delegating to `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        ScopeRef(Rc::new(RefCell::new(Scope::with_parent(self.clone()))))
    }

    /// Look up a name through the chain. `None` means not found anywhere.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.0.borrow().lookup(name)
    }

    /// Bind a name in this scope only.
    pub fn store(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().store(name, value);
    }

    /// Remove a name from this scope only.
    pub fn delete(&self, name: &str) -> bool {
        self.0.borrow_mut().delete(name)
    }

    /// Snapshot of own bindings, sorted by name.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0.borrow().entries()
    }

    /// Copy all of this scope's own bindings into `target` (module-boundary
    /// merge). Existing bindings in `target` are overwritten.
    pub fn export_into(&self, target: &ScopeRef) {
        for (name, value) in self.entries() {
            target.store(name, value);
        }
    }

    /// Identity comparison (same underlying scope).
    pub fn ptr_eq(&self, other: &ScopeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ScopeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        f.debug_struct("ScopeRef")
            .field("bindings", &scope.bindings.len())
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
