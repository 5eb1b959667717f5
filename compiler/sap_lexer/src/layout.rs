//! The indent normalizer.
//!
//! Rewrites indentation-structured source into a fully parenthesized
//! stream: every significant line opens a round group, lines indented
//! deeper nest inside it, and returning to a shallower column closes the
//! groups opened below it. Comments are stripped (quote-aware) and blank
//! or comment-only lines come out as bare newlines, so every output line
//! number still matches its input line number.
//!
//! Inserted parens are surrounded by spaces so they never glue onto
//! adjacent words.

use crate::error::{LexError, LexErrorKind};

/// One indentation column with at least one line at it. `open` is whether
/// the most recent line's group is still unclosed.
struct Level {
    col: usize,
    open: bool,
}

/// Normalize indentation into explicit round groups.
///
/// # Errors
///
/// Fails on a tab in leading whitespace or on a dedent to a column no
/// enclosing line uses.
pub fn normalize(source: &str) -> Result<String, LexError> {
    let mut out = String::with_capacity(source.len().saturating_add(16));
    // Column 0 is always a valid dedent target, even when the first
    // significant line starts indented.
    let mut stack: Vec<Level> = vec![Level { col: 0, open: false }];
    let mut line_no: u32 = 0;

    for line in source.split('\n') {
        line_no = line_no.saturating_add(1);
        let stripped = strip_comment(line);

        let mut col = 0usize;
        for byte in stripped.bytes() {
            match byte {
                b' ' => col = col.saturating_add(1),
                b'\t' => {
                    return Err(LexError::new(
                        LexErrorKind::TabInIndent,
                        line_no,
                        col_to_u32(col.saturating_add(1)),
                    ));
                }
                _ => break,
            }
        }

        let content = stripped.trim();
        if content.is_empty() {
            out.push('\n');
            continue;
        }

        let mut popped = false;
        while let Some(top) = stack.last() {
            if top.col <= col {
                break;
            }
            if let Some(level) = stack.pop() {
                if level.open {
                    out.push_str(") ");
                }
            }
            popped = true;
        }

        match stack.last_mut() {
            Some(top) if top.col == col => {
                if top.open {
                    out.push_str(") ");
                }
                top.open = true;
            }
            _ if popped => {
                return Err(LexError::new(
                    LexErrorKind::InconsistentDedent {
                        column: col_to_u32(col.saturating_add(1)),
                    },
                    line_no,
                    col_to_u32(col.saturating_add(1)),
                ));
            }
            _ => stack.push(Level { col, open: true }),
        }

        out.push_str("( ");
        out.push_str(content);
        out.push('\n');
    }

    while let Some(level) = stack.pop() {
        if level.open {
            out.push_str(") ");
        }
    }

    Ok(out)
}

fn col_to_u32(col: usize) -> u32 {
    u32::try_from(col).unwrap_or(u32::MAX)
}

/// Remove a `#` comment from a line, ignoring `#` inside quoted literals.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    if memchr::memchr(b'#', bytes).is_none() {
        return line;
    }
    let mut in_quote: Option<u8> = None;
    let mut i = 0usize;
    while let Some(&byte) = bytes.get(i) {
        match in_quote {
            Some(quote) => {
                if byte == b'\\' {
                    i = i.saturating_add(1);
                } else if byte == quote {
                    in_quote = None;
                }
            }
            None => match byte {
                b'"' | b'\'' => in_quote = Some(byte),
                b'#' => return line.get(..i).unwrap_or(line),
                _ => {}
            },
        }
        i = i.saturating_add(1);
    }
    line
}
