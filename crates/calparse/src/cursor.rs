//! Position-tracked character cursor shared by the property and duration parsers.

/// A cursor over the characters of one input string.
///
/// The position is a character index in `[0, len]`. Reaching `len` is the
/// exhausted state: `peek` and `advance` return `None` there. `position` and
/// `restore` give bounded backtracking without cloning the cursor.
#[derive(Debug)]
pub(crate) struct CharCursor {
    chars: Vec<char>,
    pos: usize,
}

impl CharCursor {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Rewind (or skip) to a position previously returned by [`position`](Self::position).
    pub(crate) fn restore(&mut self, position: usize) {
        self.pos = position.min(self.chars.len());
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consume `expected` if it is the next character.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume characters up to (not including) the first one in `stops`.
    pub(crate) fn take_until(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Consume a run of ASCII digits.
    pub(crate) fn take_digits(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Consume everything that is left.
    pub(crate) fn take_rest(&mut self) -> String {
        let rest = self.chars[self.pos..].iter().collect();
        self.pos = self.chars.len();
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_stops_at_end_of_input() {
        let mut cursor = CharCursor::new("ab");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn restore_rewinds_to_saved_position() {
        let mut cursor = CharCursor::new("KEY=VALUE");
        let saved = cursor.position();
        assert_eq!(cursor.take_until(&['=']), "KEY");
        assert_eq!(cursor.peek(), Some('='));
        cursor.restore(saved);
        assert_eq!(cursor.take_rest(), "KEY=VALUE");
    }

    #[test]
    fn restore_clamps_past_end() {
        let mut cursor = CharCursor::new("x");
        cursor.restore(10);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut cursor = CharCursor::new("zürich:1");
        assert_eq!(cursor.take_until(&[':']), "zürich");
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn take_digits_reads_only_digits() {
        let mut cursor = CharCursor::new("0605S");
        assert_eq!(cursor.take_digits(), "0605");
        assert_eq!(cursor.peek(), Some('S'));
        assert_eq!(CharCursor::new("S").take_digits(), "");
    }
}
