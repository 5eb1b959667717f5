//! Stable, searchable error codes.
//!
//! Ranges: `E01xx` layout (indent normalizer), `E02xx` structural
//! tokenizer, `E03xx` evaluation.

use std::fmt;

/// A stable error code for a diagnosable condition.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // === Layout (indent normalizer) ===
    /// Tab character in leading whitespace.
    TabInIndent,
    /// Dedent to a column that was never pushed.
    InconsistentDedent,

    // === Structural tokenizer ===
    /// End of input inside a quoted literal.
    UnterminatedString,
    /// End of input inside a bracketed group.
    UnterminatedGroup,
    /// A closing bracket of the wrong kind.
    MismatchedCloser,
    /// A closing bracket with no matching opener.
    UnexpectedCloser,

    // === Evaluation ===
    /// Name not found under a fail-fast lookup policy.
    UndefinedName,
    /// A form received a value of the wrong shape.
    ShapeMismatch,
    /// Non-numeric argument to a numeric fold.
    NotNumeric,
    /// Integer overflow during evaluation.
    Overflow,
    /// Rule registration attempted outside the setup phase.
    RegistrationClosed,
}

impl ErrorCode {
    /// The code string as rendered in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::TabInIndent => "E0101",
            ErrorCode::InconsistentDedent => "E0102",
            ErrorCode::UnterminatedString => "E0201",
            ErrorCode::UnterminatedGroup => "E0202",
            ErrorCode::MismatchedCloser => "E0203",
            ErrorCode::UnexpectedCloser => "E0204",
            ErrorCode::UndefinedName => "E0301",
            ErrorCode::ShapeMismatch => "E0302",
            ErrorCode::NotNumeric => "E0303",
            ErrorCode::Overflow => "E0304",
            ErrorCode::RegistrationClosed => "E0305",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
