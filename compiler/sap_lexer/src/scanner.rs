//! The structural tokenizer.
//!
//! Runs over the normalizer's output and produces the token tree: words,
//! quoted runs, bracketed groups, and line separators. Nothing is
//! interpreted here; the classifier gives words their meaning later.
//!
//! One wrinkle: brackets are structural only when they stand alone. A
//! bracketed run that attaches to surrounding text is part of the word
//! (`[]int`, `map[string]int`, `func[int, string]bool` are each one word).
//! An opening bracket at the start of a token opens a group only when its
//! balanced closer is followed by whitespace, another closer, or the end
//! of input.

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};
use crate::token::{GroupKind, Token};

/// Tokenize a normalized stream into a token tree.
///
/// # Errors
///
/// Fails on unterminated strings or groups and on stray or mismatched
/// closing brackets.
pub fn scan(input: &str) -> Result<Vec<Token>, LexError> {
    let mut cursor = Cursor::new(input);
    nodes(&mut cursor, None)
}

/// Collect sibling tokens until the given closer (or end of input at the
/// top level). The `u32` pair is where the open bracket sits, for the
/// unterminated-group report.
fn nodes(
    cursor: &mut Cursor<'_>,
    closer: Option<(GroupKind, u32, u32)>,
) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    loop {
        match cursor.peek() {
            None => {
                if let Some((kind, line, column)) = closer {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedGroup { open: kind.open() },
                        line,
                        column,
                    ));
                }
                break;
            }
            Some(b' ' | b'\t' | b'\r') => {
                cursor.bump();
            }
            Some(b'\n') => {
                cursor.bump();
                if matches!(tokens.last(), Some(t) if *t != Token::Sep) {
                    tokens.push(Token::Sep);
                }
            }
            Some(byte @ (b')' | b']' | b'}')) => {
                let found = char::from(byte);
                let (line, column) = (cursor.line(), cursor.column());
                match closer {
                    Some((kind, ..)) if kind.close_byte() == byte => {
                        cursor.bump();
                        if tokens.last() == Some(&Token::Sep) {
                            tokens.pop();
                        }
                        return Ok(tokens);
                    }
                    Some((kind, ..)) => {
                        return Err(LexError::new(
                            LexErrorKind::MismatchedCloser {
                                expected: kind.close(),
                                found,
                            },
                            line,
                            column,
                        ));
                    }
                    None => {
                        return Err(LexError::new(
                            LexErrorKind::UnexpectedCloser { found },
                            line,
                            column,
                        ));
                    }
                }
            }
            Some(byte @ (b'(' | b'[' | b'{')) => match GroupKind::from_open(byte) {
                Some(kind) if opens_group(cursor.rest()) => {
                    let (line, column) = (cursor.line(), cursor.column());
                    cursor.bump();
                    let inner = nodes(cursor, Some((kind, line, column)))?;
                    tokens.push(Token::Group(kind, inner));
                }
                _ => tokens.push(word(cursor)?),
            },
            Some(_) => tokens.push(word(cursor)?),
        }
    }
    if tokens.last() == Some(&Token::Sep) {
        tokens.pop();
    }
    Ok(tokens)
}

/// Decide whether an opening bracket at the start of a token is
/// structural. `rest` begins at the bracket.
fn opens_group(rest: &[u8]) -> bool {
    let Some(&open) = rest.first() else {
        return false;
    };
    let close = closer_for(open);
    let mut depth = 0usize;
    let mut in_quote: Option<u8> = None;
    let mut i = 0usize;
    while let Some(&byte) = rest.get(i) {
        match in_quote {
            Some(quote) => {
                if byte == b'\n' {
                    return true;
                } else if byte == b'\\' {
                    i = i.saturating_add(1);
                } else if byte == quote {
                    in_quote = None;
                }
            }
            None if byte == open => depth = depth.saturating_add(1),
            None if byte == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return is_boundary(rest.get(i.saturating_add(1)).copied());
                }
            }
            None if byte == b'"' || byte == b'\'' => in_quote = Some(byte),
            // Spanning a line break means structural nesting.
            None if byte == b'\n' => return true,
            None => {}
        }
        i = i.saturating_add(1);
    }
    true
}

fn closer_for(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}

fn is_boundary(byte: Option<u8>) -> bool {
    matches!(
        byte,
        None | Some(b' ' | b'\t' | b'\r' | b'\n' | b')' | b']' | b'}')
    )
}

/// Consume one word (or standalone quoted run) verbatim.
fn word(cursor: &mut Cursor<'_>) -> Result<Token, LexError> {
    let start = cursor.pos();
    if matches!(cursor.peek(), Some(b'"' | b'\'')) {
        consume_quoted(cursor)?;
        if is_boundary(cursor.peek()) {
            return Ok(Token::Quoted(cursor.slice_from(start).to_owned()));
        }
    }
    loop {
        match cursor.peek() {
            None | Some(b' ' | b'\t' | b'\r' | b'\n' | b')' | b']' | b'}') => break,
            Some(b'"' | b'\'') => consume_quoted(cursor)?,
            Some(b'(' | b'[' | b'{') => consume_bracketed(cursor)?,
            Some(_) => {
                cursor.bump();
            }
        }
    }
    Ok(Token::Word(cursor.slice_from(start).to_owned()))
}

/// Consume a quoted run, keeping quotes and escape pairs verbatim.
fn consume_quoted(cursor: &mut Cursor<'_>) -> Result<(), LexError> {
    let (line, column) = (cursor.line(), cursor.column());
    let Some(quote) = cursor.bump() else {
        return Ok(());
    };
    loop {
        match cursor.peek() {
            None | Some(b'\n') => {
                return Err(LexError::new(LexErrorKind::UnterminatedString, line, column));
            }
            Some(b'\\') => {
                cursor.bump();
                cursor.bump();
            }
            Some(byte) if byte == quote => {
                cursor.bump();
                return Ok(());
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}

/// Consume a word-attached bracketed run verbatim, including any spaces
/// and quoted runs inside it.
fn consume_bracketed(cursor: &mut Cursor<'_>) -> Result<(), LexError> {
    let (line, column) = (cursor.line(), cursor.column());
    let Some(open) = cursor.bump() else {
        return Ok(());
    };
    let close = closer_for(open);
    let mut depth = 1usize;
    loop {
        match cursor.peek() {
            None | Some(b'\n') => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedGroup {
                        open: char::from(open),
                    },
                    line,
                    column,
                ));
            }
            Some(b'"' | b'\'') => consume_quoted(cursor)?,
            Some(byte) if byte == open => {
                depth = depth.saturating_add(1);
                cursor.bump();
            }
            Some(byte) if byte == close => {
                depth = depth.saturating_sub(1);
                cursor.bump();
                if depth == 0 {
                    return Ok(());
                }
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan_ok(input: &str) -> Vec<Token> {
        match scan(input) {
            Ok(tokens) => tokens,
            Err(err) => panic!("scan failed on {input:?}: {err}"),
        }
    }

    fn word_tok(text: &str) -> Token {
        Token::Word(text.to_owned())
    }

    #[test]
    fn words_and_groups() {
        let tokens = scan_ok("( if true ( 1 ) ) ");
        assert_eq!(
            tokens,
            vec![Token::Group(
                GroupKind::Round,
                vec![
                    word_tok("if"),
                    word_tok("true"),
                    Token::Group(GroupKind::Round, vec![word_tok("1")]),
                ],
            )]
        );
    }

    #[test]
    fn line_breaks_become_separators() {
        let tokens = scan_ok("( a\nb\n\nc\n) ");
        assert_eq!(
            tokens,
            vec![Token::Group(
                GroupKind::Round,
                vec![
                    word_tok("a"),
                    Token::Sep,
                    word_tok("b"),
                    Token::Sep,
                    word_tok("c"),
                ],
            )]
        );
    }

    #[test]
    fn attached_brackets_stay_inside_the_word() {
        assert_eq!(scan_ok("[]int"), vec![word_tok("[]int")]);
        assert_eq!(scan_ok("map[string]int"), vec![word_tok("map[string]int")]);
        assert_eq!(
            scan_ok("func[int, string]bool"),
            vec![word_tok("func[int, string]bool")]
        );
    }

    #[test]
    fn standalone_brackets_open_groups() {
        let tokens = scan_ok("[1 2 3]");
        assert_eq!(
            tokens,
            vec![Token::Group(
                GroupKind::Square,
                vec![word_tok("1"), word_tok("2"), word_tok("3")],
            )]
        );
    }

    #[test]
    fn standalone_quoted_run_is_a_quoted_token() {
        assert_eq!(
            scan_ok("\"a b\""),
            vec![Token::Quoted("\"a b\"".to_owned())]
        );
        assert_eq!(
            scan_ok("\"esc \\\" quote\""),
            vec![Token::Quoted("\"esc \\\" quote\"".to_owned())]
        );
    }

    #[test]
    fn attached_quotes_fold_into_the_word() {
        assert_eq!(scan_ok(",\"hi\""), vec![word_tok(",\"hi\"")]);
        assert_eq!(scan_ok("`'x'"), vec![word_tok("`'x'")]);
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let err = match scan("\"abc") {
            Err(err) => err,
            Ok(tokens) => panic!("expected error, got {tokens:?}"),
        };
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn wrong_closer_is_fatal() {
        let err = match scan("(a]") {
            Err(err) => err,
            Ok(tokens) => panic!("expected error, got {tokens:?}"),
        };
        assert_eq!(
            err.kind,
            LexErrorKind::MismatchedCloser {
                expected: ')',
                found: ']',
            }
        );
    }

    #[test]
    fn stray_closer_is_fatal() {
        let err = match scan("a )") {
            Err(err) => err,
            Ok(tokens) => panic!("expected error, got {tokens:?}"),
        };
        assert_eq!(err.kind, LexErrorKind::UnexpectedCloser { found: ')' });
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn unterminated_group_reports_the_opener() {
        let err = match scan("( a b") {
            Err(err) => err,
            Ok(tokens) => panic!("expected error, got {tokens:?}"),
        };
        assert_eq!(err.kind, LexErrorKind::UnterminatedGroup { open: '(' });
        assert_eq!((err.line, err.column), (1, 1));
    }
}
