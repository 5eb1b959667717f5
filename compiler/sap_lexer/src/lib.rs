//! Lexing for Sap source: indent normalization plus structural tokenizing.
//!
//! The front half of the pipeline. [`normalize`] rewrites indentation into
//! explicit round groups; [`scan`] turns the rewritten stream into a token
//! tree of verbatim words, quoted runs, and nested groups. [`tokenize`]
//! runs both.
//!
//! Tokens carry no meaning yet. Deciding that `0x2c` is an integer or that
//! `[]int` is a slice type is the classifier's job, one crate up.

mod cursor;
mod error;
mod layout;
mod scanner;
mod token;

pub use error::{LexError, LexErrorKind};
pub use layout::normalize;
pub use scanner::scan;
pub use token::{GroupKind, Token};

/// Normalize and tokenize a source file in one step.
///
/// # Errors
///
/// Fails on layout errors (tabs in indentation, inconsistent dedents) and
/// structural errors (unterminated strings or groups, stray closers).
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let normalized = normalize(source)?;
    scan(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn word(text: &str) -> Token {
        Token::Word(text.to_owned())
    }

    #[test]
    fn indentation_becomes_nesting() {
        let source = "if true\n  1\nelse\n  2";
        let tokens = match tokenize(source) {
            Ok(tokens) => tokens,
            Err(err) => panic!("tokenize failed: {err}"),
        };
        assert_eq!(
            tokens,
            vec![
                Token::Group(
                    GroupKind::Round,
                    vec![
                        word("if"),
                        word("true"),
                        Token::Sep,
                        Token::Group(GroupKind::Round, vec![word("1")]),
                    ],
                ),
                Token::Group(
                    GroupKind::Round,
                    vec![
                        word("else"),
                        Token::Sep,
                        Token::Group(GroupKind::Round, vec![word("2")]),
                    ],
                ),
            ]
        );
    }

    #[test]
    fn comments_do_not_change_structure() {
        let plain = tokenize("a b\nc");
        let commented = tokenize("a b # trailing\n# full line\nc");
        assert_eq!(plain, commented);
    }

    proptest! {
        #[test]
        fn never_panics_on_arbitrary_input(source in "[ -~\\n\\t]{0,200}") {
            let _ = tokenize(&source);
        }

        #[test]
        fn extra_spaces_between_words_do_not_matter(
            words in proptest::collection::vec("[a-z]{1,8}", 1..6),
            pads in proptest::collection::vec(1usize..4, 0..6),
        ) {
            let single = words.join(" ");
            let mut padded = String::new();
            for (i, w) in words.iter().enumerate() {
                if i > 0 {
                    let n = pads.get(i).copied().unwrap_or(1);
                    padded.push_str(&" ".repeat(n));
                }
                padded.push_str(w);
            }
            prop_assert_eq!(tokenize(&single), tokenize(&padded));
        }
    }
}
