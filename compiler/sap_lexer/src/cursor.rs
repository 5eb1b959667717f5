//! A byte cursor with line/column bookkeeping.

/// Forward-only cursor over the normalized stream.
///
/// Lines are 1-based and match the source file (the normalizer preserves
/// line structure); columns are 1-based byte offsets into the normalized
/// line.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Everything from the current position on.
    pub(crate) fn rest(&self) -> &'a [u8] {
        self.input.as_bytes().get(self.pos..).unwrap_or(&[])
    }

    /// Consume one byte, tracking line and column.
    pub(crate) fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos = self.pos.saturating_add(1);
        if byte == b'\n' {
            self.line = self.line.saturating_add(1);
            self.column = 1;
        } else {
            self.column = self.column.saturating_add(1);
        }
        Some(byte)
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Text from `start` up to the current position. Token boundaries are
    /// always ASCII bytes, so the slice lands on char boundaries.
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.input.get(start..self.pos).unwrap_or("")
    }

    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn column(&self) -> u32 {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tracks_lines_and_columns() {
        let mut cursor = Cursor::new("ab\nc");
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
        cursor.bump();
        cursor.bump();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
        cursor.bump();
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
        assert_eq!(cursor.peek(), Some(b'c'));
    }

    #[test]
    fn slices_consumed_text() {
        let mut cursor = Cursor::new("word next");
        let start = cursor.pos();
        while matches!(cursor.peek(), Some(b) if b != b' ') {
            cursor.bump();
        }
        assert_eq!(cursor.slice_from(start), "word");
    }
}
