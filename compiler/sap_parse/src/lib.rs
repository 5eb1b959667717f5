//! Parsing for Sap source: classification and tree reading.
//!
//! Sits on top of `sap_lexer`. The lexer establishes grouping; this crate
//! assigns meaning: each verbatim word runs through an ordered rule chain
//! ([`RuleSet`]) and the token tree becomes a [`sap_ir::Value`] tree ready
//! for evaluation.
//!
//! The rule chain is open: user rules (callables) can be appended after
//! the built-ins, which is how evaluated source extends the reader.

mod classify;
pub mod markers;
mod reader;
mod rules;
mod splitter;

use std::fmt;

use sap_diagnostic::Diagnostic;
use sap_ir::Value;
use sap_lexer::LexError;

pub use rules::{Rule, RuleSet, UserRule};

/// A parse failure. Everything fatal in the front end originates in the
/// lexer; classification itself cannot fail.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    lex: LexError,
}

impl ParseError {
    /// Render as a diagnostic for reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        self.lex.to_diagnostic()
    }
}

impl From<LexError> for ParseError {
    fn from(lex: LexError) -> Self {
        ParseError { lex }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lex.fmt(f)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.lex)
    }
}

/// Run the whole front end over one file.
///
/// Returns the file as a `file`-tagged sequence of top-level forms.
///
/// # Errors
///
/// Fails on lexing errors; see [`sap_lexer::tokenize`].
pub fn parse_source(source: &str, rules: &RuleSet) -> Result<Value, ParseError> {
    tracing::debug!(bytes = source.len(), "parsing source");
    let tokens = sap_lexer::tokenize(source)?;
    Ok(reader::file_unit(&tokens, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ident(name: &str) -> Value {
        Value::ident(name)
    }

    #[test]
    fn parses_an_indented_conditional() {
        let source = "if true\n  1\nelse\n  2";
        let tree = match parse_source(source, &RuleSet::standard()) {
            Ok(tree) => tree,
            Err(err) => panic!("parse failed: {err}"),
        };
        assert_eq!(
            tree,
            Value::seq(vec![
                ident("file"),
                Value::seq(vec![
                    ident("if"),
                    Value::Bool(true),
                    Value::seq(vec![Value::Int(1)]),
                ]),
                Value::seq(vec![ident("else"), Value::seq(vec![Value::Int(2)])]),
            ])
        );
    }

    #[test]
    fn lex_errors_surface_with_their_position() {
        let err = match parse_source("a\n\tb", &RuleSet::standard()) {
            Err(err) => err,
            Ok(tree) => panic!("expected error, got {tree}"),
        };
        let diag = err.to_diagnostic();
        assert_eq!(
            diag.to_string(),
            "error[E0101]: tab character in indentation\n --> line 2, column 1"
        );
    }
}
