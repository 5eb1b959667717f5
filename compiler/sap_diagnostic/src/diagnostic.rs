//! The diagnostic value and its terminal rendering.

use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A renderable diagnostic.
///
/// Built with the fluent constructors; rendered through `Display`:
///
/// ```text
/// error[E0102]: dedent to column 3, which no enclosing line uses
///  --> line 5, column 4
///  = note: indentation must return to a previously used column
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    /// How severe this diagnostic is.
    pub severity: Severity,
    /// Stable code, when the condition has one.
    pub code: Option<ErrorCode>,
    /// Primary message (what went wrong).
    pub message: String,
    /// 1-based source line, when known.
    pub line: Option<u32>,
    /// 1-based source column, when known.
    pub column: Option<u32>,
    /// Additional context lines.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            line: None,
            column: None,
            notes: Vec::new(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(message)
        }
    }

    /// Attach a stable error code.
    #[must_use]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a source location (1-based line and column).
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Append a note line.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{code}]: {}", self.severity, self.message)?,
            None => write!(f, "{}: {}", self.severity, self.message)?,
        }
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, "\n --> line {line}, column {column}")?;
        }
        for note in &self.notes {
            write!(f, "\n = note: {note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_code_location_and_notes() {
        let diag = Diagnostic::error("tab character in indentation")
            .with_code(ErrorCode::TabInIndent)
            .at(3, 1)
            .with_note("indent with spaces only");
        assert_eq!(
            diag.to_string(),
            "error[E0101]: tab character in indentation\n \
             --> line 3, column 1\n \
             = note: indent with spaces only"
        );
    }

    #[test]
    fn renders_bare_message_without_code() {
        let diag = Diagnostic::warning("shadowed binding");
        assert_eq!(diag.to_string(), "warning: shadowed binding");
    }
}
