//! Lexing errors and their diagnostic rendering.

use std::fmt;

use sap_diagnostic::{Diagnostic, ErrorCode};

/// What went wrong while normalizing or tokenizing.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum LexErrorKind {
    /// A tab character in leading whitespace.
    TabInIndent,
    /// A dedent to a column no enclosing line uses.
    InconsistentDedent {
        /// The 1-based column the line dedented to.
        column: u32,
    },
    /// End of line or input inside a quoted literal.
    UnterminatedString,
    /// End of input inside a bracketed group.
    UnterminatedGroup {
        /// The opening bracket of the group.
        open: char,
    },
    /// A closing bracket of the wrong kind for the open group.
    MismatchedCloser {
        /// The closer the open group requires.
        expected: char,
        /// The closer actually present.
        found: char,
    },
    /// A closing bracket with no group open.
    UnexpectedCloser {
        /// The closer actually present.
        found: char,
    },
}

/// A fatal lexing error with its source position.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// 1-based source line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl LexError {
    pub(crate) fn new(kind: LexErrorKind, line: u32, column: u32) -> Self {
        LexError { kind, line, column }
    }

    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::TabInIndent => ErrorCode::TabInIndent,
            LexErrorKind::InconsistentDedent { .. } => ErrorCode::InconsistentDedent,
            LexErrorKind::UnterminatedString => ErrorCode::UnterminatedString,
            LexErrorKind::UnterminatedGroup { .. } => ErrorCode::UnterminatedGroup,
            LexErrorKind::MismatchedCloser { .. } => ErrorCode::MismatchedCloser,
            LexErrorKind::UnexpectedCloser { .. } => ErrorCode::UnexpectedCloser,
        }
    }

    /// Render as a diagnostic for reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .with_code(self.code())
            .at(self.line, self.column)
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::TabInIndent => {
                write!(f, "tab character in indentation")
            }
            LexErrorKind::InconsistentDedent { column } => {
                write!(f, "dedent to column {column}, which no enclosing line uses")
            }
            LexErrorKind::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            LexErrorKind::UnterminatedGroup { open } => {
                write!(f, "unterminated group opened with `{open}`")
            }
            LexErrorKind::MismatchedCloser { expected, found } => {
                write!(f, "mismatched closer: expected `{expected}`, found `{found}`")
            }
            LexErrorKind::UnexpectedCloser { found } => {
                write!(f, "closer `{found}` with no open group")
            }
        }
    }
}

impl std::error::Error for LexError {}
