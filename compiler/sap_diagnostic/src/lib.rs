//! Diagnostic system for error reporting.
//!
//! Design goals, in order:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - A source location (line/column) where one exists
//! - Notes (why it's wrong, how to fix)
//!
//! Locations are line/column rather than byte spans: the tokenizer runs
//! over the indent normalizer's rewritten stream, whose byte offsets do not
//! map back to the source file, but whose line structure does.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
