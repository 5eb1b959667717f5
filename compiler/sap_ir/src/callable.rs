//! The lazy-argument apply protocol.
//!
//! A callable receives the *unevaluated* remainder of its sequence as a
//! pull-style cursor. The callable alone decides which arguments to
//! evaluate, in what order, or whether to treat them as literal syntax —
//! this single rule is what implements special forms without a case split
//! in the evaluator.

use std::fmt;
use std::rc::Rc;

use crate::{shape_mismatch, EvalError, EvalResult, Heap, ScopeRef, Value};

/// The seam between callables and whichever evaluator invoked them.
///
/// Callables that want an argument's *value* (rather than its syntax) ask
/// the context to evaluate it, so pass-specific behavior — such as the
/// lookup-miss policy — flows through unchanged.
pub trait EvalContext {
    /// Evaluate a value in the given scope.
    fn eval(&self, value: &Value, scope: &ScopeRef) -> EvalResult;
}

/// Lazy cursor over the unevaluated remainder of a sequence.
///
/// Pulling from the cursor yields syntax, never values; it is a resumable
/// index into the owning sequence, not a copy.
pub struct Args<'a> {
    items: &'a [Value],
    pos: usize,
}

impl<'a> Args<'a> {
    /// Create a cursor over the given argument expressions.
    pub fn new(items: &'a [Value]) -> Self {
        Args { items, pos: 0 }
    }

    /// Pull the next unevaluated argument, advancing the cursor.
    pub fn next(&mut self) -> Option<&'a Value> {
        let item = self.items.get(self.pos)?;
        self.pos = self.pos.saturating_add(1);
        Some(item)
    }

    /// Look at the next argument without advancing.
    pub fn peek(&self) -> Option<&'a Value> {
        self.items.get(self.pos)
    }

    /// Everything not yet pulled, as literal syntax.
    pub fn remaining(&self) -> &'a [Value] {
        self.items.get(self.pos..).unwrap_or(&[])
    }

    /// Returns `true` when every argument has been pulled.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.items.len()
    }

    /// Pull the next argument or fail with a shape mismatch naming what the
    /// form expected.
    pub fn expect_next(&mut self, expected: &str) -> Result<&'a Value, EvalError> {
        self.next()
            .ok_or_else(|| shape_mismatch(expected, &Value::None))
    }

    /// Pull the next argument and require it to be an identifier, returning
    /// its name. Definition forms consume names without evaluating them.
    pub fn expect_ident(&mut self, expected: &str) -> Result<&'a str, EvalError> {
        let value = self.expect_next(expected)?;
        value.as_ident().ok_or_else(|| shape_mismatch(expected, value))
    }
}

/// Signature of an apply implementation.
pub type ApplyFn = dyn Fn(&dyn EvalContext, &ScopeRef, &mut Args<'_>) -> EvalResult;

/// The apply capability: a named, boxed apply function.
///
/// Equality is identity (same underlying function), which is what scope
/// round-trips need; two independently built callables are never equal.
#[derive(Clone)]
pub struct Callable {
    name: Heap<String>,
    fun: Rc<ApplyFn>,
}

impl Callable {
    /// Create a callable from a name and an apply function.
    pub fn new(
        name: impl Into<String>,
        fun: impl Fn(&dyn EvalContext, &ScopeRef, &mut Args<'_>) -> EvalResult + 'static,
    ) -> Self {
        Callable {
            name: Heap::new(name.into()),
            fun: Rc::new(fun),
        }
    }

    /// The callable's name, for rendering and diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with a scope and the lazy argument cursor.
    #[inline]
    pub fn invoke(
        &self,
        cx: &dyn EvalContext,
        scope: &ScopeRef,
        args: &mut Args<'_>,
    ) -> EvalResult {
        (self.fun)(cx, scope, args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name())
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        // Compare data pointers only; vtable addresses are not stable.
        let lhs: *const () = Rc::as_ptr(&self.fun).cast();
        let rhs: *const () = Rc::as_ptr(&other.fun).cast();
        std::ptr::eq(lhs, rhs)
    }
}
