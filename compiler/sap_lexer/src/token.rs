//! Structural tokens.
//!
//! The tokenizer groups, it does not interpret: words and quoted runs come
//! out verbatim, and all meaning (literals, operators, type shapes) is
//! assigned later by the word classifier.

/// The three bracket pairs that open nested groups.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GroupKind {
    /// `( ... )` — also what the indent normalizer inserts.
    Round,
    /// `[ ... ]`
    Square,
    /// `{ ... }`
    Curly,
}

impl GroupKind {
    /// The kind opened by the given byte, if any.
    pub fn from_open(byte: u8) -> Option<Self> {
        match byte {
            b'(' => Some(GroupKind::Round),
            b'[' => Some(GroupKind::Square),
            b'{' => Some(GroupKind::Curly),
            _ => None,
        }
    }

    /// The opening bracket character.
    pub fn open(self) -> char {
        match self {
            GroupKind::Round => '(',
            GroupKind::Square => '[',
            GroupKind::Curly => '{',
        }
    }

    /// The closing bracket character.
    pub fn close(self) -> char {
        match self {
            GroupKind::Round => ')',
            GroupKind::Square => ']',
            GroupKind::Curly => '}',
        }
    }

    pub(crate) fn close_byte(self) -> u8 {
        match self {
            GroupKind::Round => b')',
            GroupKind::Square => b']',
            GroupKind::Curly => b'}',
        }
    }
}

/// One structural token.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Token {
    /// A contiguous run of non-whitespace text, kept verbatim. May contain
    /// bracketed or quoted sub-runs when they attach to surrounding text
    /// (`[]int`, `map[string]int`, `,"lit"`).
    Word(String),
    /// A standalone quoted literal, kept verbatim including its quotes and
    /// unprocessed escapes.
    Quoted(String),
    /// A bracketed group of nested tokens.
    Group(GroupKind, Vec<Token>),
    /// A line break between sibling tokens inside a group.
    ///
    /// Space-separation needs no marker: each whitespace run already ends
    /// the current word, so adjacent tokens in the `Vec` are separated by
    /// construction. Only line breaks carry meaning past that boundary.
    Sep,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds_round_trip_through_bytes() {
        for kind in [GroupKind::Round, GroupKind::Square, GroupKind::Curly] {
            let open = kind.open();
            let mut buf = [0u8; 4];
            let byte = open.encode_utf8(&mut buf).as_bytes()[0];
            assert_eq!(GroupKind::from_open(byte), Some(kind));
        }
        assert_eq!(GroupKind::from_open(b'<'), None);
    }
}
