//! Quote- and bracket-aware word splitting.
//!
//! Several classifier rules need to cut a word at a separator character —
//! colon lists, comma-separated type parameters, dotted paths — without
//! cutting inside a quoted run or a bracketed run. Both helpers report
//! no-match (`None`) on unbalanced input rather than guessing.

/// Split `text` at top-level occurrences of `sep`.
///
/// Quoted and bracketed runs are opaque. Returns `None` when a quote never
/// closes or brackets are unbalanced or mismatched; otherwise the parts in
/// order (a single part when `sep` never occurs at the top level).
pub(crate) fn split_unquoted(text: &str, sep: u8) -> Option<Vec<&str>> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut closers: Vec<u8> = Vec::new();
    let mut i = 0usize;
    while let Some(&byte) = bytes.get(i) {
        match byte {
            b'"' | b'\'' => {
                i = skip_quoted(bytes, i)?;
                continue;
            }
            b'(' | b'[' | b'{' => closers.push(closer_for(byte)),
            b')' | b']' | b'}' => {
                if closers.pop() != Some(byte) {
                    return None;
                }
            }
            _ if byte == sep && closers.is_empty() => {
                parts.push(text.get(start..i).unwrap_or(""));
                start = i.saturating_add(1);
            }
            _ => {}
        }
        i = i.saturating_add(1);
    }
    if !closers.is_empty() {
        return None;
    }
    parts.push(text.get(start..).unwrap_or(""));
    Some(parts)
}

/// Index of the closer matching the opener at `open_idx`, quote-aware.
pub(crate) fn find_balanced(text: &str, open_idx: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let open = *bytes.get(open_idx)?;
    let close = closer_for(open);
    let mut depth = 0usize;
    let mut i = open_idx;
    while let Some(&byte) = bytes.get(i) {
        if byte == b'"' || byte == b'\'' {
            i = skip_quoted(bytes, i)?;
            continue;
        }
        if byte == open {
            depth = depth.saturating_add(1);
        } else if byte == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i);
            }
        }
        i = i.saturating_add(1);
    }
    None
}

/// Index just past the closing quote of the run opening at `open`.
fn skip_quoted(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = *bytes.get(open)?;
    let mut i = open.saturating_add(1);
    while let Some(&byte) = bytes.get(i) {
        if byte == b'\\' {
            i = i.saturating_add(2);
        } else if byte == quote {
            return Some(i.saturating_add(1));
        } else {
            i = i.saturating_add(1);
        }
    }
    None
}

fn closer_for(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_at_top_level_only() {
        assert_eq!(
            split_unquoted("a:b:c", b':'),
            Some(vec!["a", "b", "c"])
        );
        assert_eq!(
            split_unquoted("a:\"b:c\":d", b':'),
            Some(vec!["a", "\"b:c\"", "d"])
        );
        assert_eq!(
            split_unquoted("f[a:b]:c", b':'),
            Some(vec!["f[a:b]", "c"])
        );
    }

    #[test]
    fn single_part_when_no_separator() {
        assert_eq!(split_unquoted("plain", b':'), Some(vec!["plain"]));
    }

    #[test]
    fn unbalanced_input_is_no_match() {
        assert_eq!(split_unquoted("a:[b", b':'), None);
        assert_eq!(split_unquoted("a:(b]", b':'), None);
        assert_eq!(split_unquoted("\"open:", b':'), None);
    }

    #[test]
    fn finds_matching_closer_through_nesting() {
        assert_eq!(find_balanced("map[[]int]x", 3), Some(9));
        assert_eq!(find_balanced("[a['b]c']]", 0), Some(9));
        assert_eq!(find_balanced("[open", 0), None);
    }
}
