//! Token tree to value tree.
//!
//! Words go through the classifier; groups become sequences. Round groups
//! read as plain sequences (they carry call structure), square groups are
//! tagged `vec` and curly groups `dict` so later passes can tell literal
//! collections from calls. Separators only delimit and are dropped here.

use sap_ir::Value;
use sap_lexer::{GroupKind, Token};

use crate::markers;
use crate::rules::RuleSet;

/// Read a whole file's tokens as one `file`-tagged sequence.
pub(crate) fn file_unit(tokens: &[Token], rules: &RuleSet) -> Value {
    let mut items = vec![Value::ident(markers::FILE)];
    items.extend(read_forms(tokens, rules));
    Value::seq(items)
}

fn read_forms(tokens: &[Token], rules: &RuleSet) -> Vec<Value> {
    tokens
        .iter()
        .filter(|token| **token != Token::Sep)
        .map(|token| read_token(token, rules))
        .collect()
}

fn read_token(token: &Token, rules: &RuleSet) -> Value {
    match token {
        Token::Word(text) | Token::Quoted(text) => rules.classify(text),
        Token::Group(GroupKind::Round, inner) => Value::seq(read_forms(inner, rules)),
        Token::Group(GroupKind::Square, inner) => tagged_group(markers::VEC, inner, rules),
        Token::Group(GroupKind::Curly, inner) => tagged_group(markers::DICT, inner, rules),
        Token::Sep => Value::None,
    }
}

fn tagged_group(marker: &str, inner: &[Token], rules: &RuleSet) -> Value {
    let mut items = vec![Value::ident(marker)];
    items.extend(read_forms(inner, rules));
    Value::seq(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read(source: &str) -> Value {
        let tokens = match sap_lexer::tokenize(source) {
            Ok(tokens) => tokens,
            Err(err) => panic!("tokenize failed: {err}"),
        };
        file_unit(&tokens, &RuleSet::standard())
    }

    fn ident(name: &str) -> Value {
        Value::ident(name)
    }

    #[test]
    fn square_and_curly_groups_are_tagged() {
        assert_eq!(
            read("put [1 2] {a 1}"),
            Value::seq(vec![
                ident("file"),
                Value::seq(vec![
                    ident("put"),
                    Value::seq(vec![ident("vec"), Value::Int(1), Value::Int(2)]),
                    Value::seq(vec![ident("dict"), ident("a"), Value::Int(1)]),
                ]),
            ])
        );
    }

    #[test]
    fn separators_do_not_appear_in_the_tree() {
        assert_eq!(
            read("a\nb"),
            Value::seq(vec![
                ident("file"),
                Value::seq(vec![ident("a")]),
                Value::seq(vec![ident("b")]),
            ])
        );
    }
}
