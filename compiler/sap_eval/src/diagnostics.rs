//! Evaluation errors as reportable diagnostics.

use sap_diagnostic::{Diagnostic, ErrorCode};
use sap_ir::{EvalError, EvalErrorKind};

/// Stable code for an evaluation error.
pub fn error_code(err: &EvalError) -> ErrorCode {
    match err.kind {
        EvalErrorKind::UndefinedName { .. } => ErrorCode::UndefinedName,
        EvalErrorKind::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
        EvalErrorKind::NotNumeric { .. } => ErrorCode::NotNumeric,
        EvalErrorKind::Overflow { .. } => ErrorCode::Overflow,
        EvalErrorKind::RegistrationClosed => ErrorCode::RegistrationClosed,
    }
}

/// Render an evaluation error as a diagnostic.
///
/// Evaluation errors carry no source position: they arise from the value
/// tree, after locations have served their purpose in the front end.
pub fn diagnose(err: &EvalError) -> Diagnostic {
    Diagnostic::error(err.to_string()).with_code(error_code(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sap_ir::undefined_name;

    #[test]
    fn undefined_name_renders_with_its_code() {
        let diag = diagnose(&undefined_name("ghost"));
        assert_eq!(diag.to_string(), "error[E0301]: undefined name `ghost`");
    }
}
