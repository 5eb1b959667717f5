//! Evaluation error types.
//!
//! `EvalErrorKind` provides typed categories for diagnostic conversion;
//! factory functions populate both `kind` and a prebuilt `message`, so call
//! sites never format error text by hand.

use std::fmt;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// An evaluation-stage error.
///
/// Evaluation errors are local and recoverable: the consuming pass decides
/// whether to contain one per-form (the code-generation convention) or to
/// abort the whole pass (the macro-expansion convention).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Typed category for programmatic matching.
    pub kind: EvalErrorKind,
    /// Human-readable message, prebuilt by the factory functions.
    pub message: String,
}

/// Typed error category for structured diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A name was not found in the scope chain and the active lookup-miss
    /// policy treats that as fatal.
    UndefinedName { name: String },
    /// A form received a value of the wrong shape (e.g. a sequence where an
    /// identifier was required).
    ShapeMismatch { expected: String, got: String },
    /// A numeric fold hit a non-numeric argument.
    NotNumeric { got: String },
    /// Integer arithmetic overflowed.
    Overflow { operation: String },
    /// Rule registration was attempted outside the setup phase.
    RegistrationClosed,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

/// A name lookup failed under a fail-fast miss policy.
pub fn undefined_name(name: &str) -> EvalError {
    EvalError {
        kind: EvalErrorKind::UndefinedName {
            name: name.to_string(),
        },
        message: format!("undefined name `{name}`"),
    }
}

/// A form received a value of the wrong shape.
///
/// `got` is the offending value; its type name is embedded in the message so
/// the surfaced error is self-describing.
pub fn shape_mismatch(expected: &str, got: &Value) -> EvalError {
    EvalError {
        kind: EvalErrorKind::ShapeMismatch {
            expected: expected.to_string(),
            got: got.type_name().to_string(),
        },
        message: format!("expected {expected}, got {}", got.type_name()),
    }
}

/// A numeric fold hit a non-numeric argument.
pub fn not_numeric(got: &Value) -> EvalError {
    EvalError {
        kind: EvalErrorKind::NotNumeric {
            got: got.type_name().to_string(),
        },
        message: format!("expected a number, got {}", got.type_name()),
    }
}

/// Integer arithmetic overflowed.
pub fn overflow(operation: &str) -> EvalError {
    EvalError {
        kind: EvalErrorKind::Overflow {
            operation: operation.to_string(),
        },
        message: format!("integer overflow in {operation}"),
    }
}

/// Rule registration was attempted while a parse was in progress.
pub fn registration_closed() -> EvalError {
    EvalError {
        kind: EvalErrorKind::RegistrationClosed,
        message: "reader rules can only be installed during the setup phase, not while parsing"
            .to_string(),
    }
}
