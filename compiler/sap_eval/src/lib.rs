//! Evaluation for Sap: the engine, the standard forms, and the session.
//!
//! The evaluator knows three rules (leaves, identifiers, sequences) and
//! nothing else; everything recognizable as a language feature is a
//! callable in the scope chain. [`Session`] packages a whole compilation
//! pass: parse with the current rule chain, evaluate against the root
//! scope, extend the reader through `install-rule`.

#![deny(clippy::arithmetic_side_effects)]

mod builtins;
mod diagnostics;
mod evaluator;
mod session;

#[cfg(test)]
mod tests;

pub use builtins::{install, root_scope};
pub use diagnostics::{diagnose, error_code};
pub use evaluator::{Evaluator, MissPolicy};
pub use session::{CompileError, Session};
