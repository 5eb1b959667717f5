//! Sap IR - Symbolic data model for the Sap compiler.
//!
//! Every entity the front end manipulates — literal, identifier, sequence,
//! scope, callable — is a [`Value`]. This crate provides:
//!
//! - `Value` and its factory methods (heap allocations go through `Heap<T>`)
//! - `Seq`, the sole composite shape (ordered, mutable, growable, acyclic
//!   by construction — elements are owned by value)
//! - `Scope`/`ScopeRef`, the lexical environment chain
//! - `Callable`/`Args`, the lazy-argument apply protocol
//! - `EvalError`/`EvalResult` and the `EvalContext` seam that lets a
//!   callable reach back into whichever evaluator invoked it
//!
//! # Thread Safety
//!
//! Scopes and callables use `Rc` internally: evaluation is single-threaded
//! per compilation pass by design. Parallel per-file compilation gets one
//! root scope per file, never a shared one.

mod callable;
mod errors;
mod heap;
mod scope;
mod seq;
mod value;

pub use callable::{ApplyFn, Args, Callable, EvalContext};
pub use errors::{
    not_numeric, overflow, registration_closed, shape_mismatch, undefined_name, EvalError,
    EvalErrorKind, EvalResult,
};
pub use heap::Heap;
pub use scope::{Scope, ScopeRef};
pub use seq::Seq;
pub use value::Value;
