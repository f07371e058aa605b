/// A cursor over a single line for byte-by-byte block parsing.
///
/// Operates over the line text (newline already stripped) while tracking the
/// absolute byte position in the rope via the `base` offset. The cursor is a
/// plain value: clone it to save a position and restore by assignment.
/// Nothing it does can move past the end of its line.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    /// The line being parsed.
    pub s: &'a str,
    /// Base offset in the rope (added to local index for absolute positions).
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> LineCursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns the current column, counted in characters from line start.
    pub fn column(&self) -> usize {
        self.s[..self.i].chars().count()
    }

    /// Returns true if at end of line.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The unconsumed remainder of the line.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().as_bytes().starts_with(pat)
    }

    /// Checks for `lit` at the cursor, ignoring ASCII case.
    pub fn starts_with_ignore_case(&self, lit: &str) -> bool {
        self.rest()
            .as_bytes()
            .get(..lit.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(lit.as_bytes()))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, clamped to the end of the line.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Skips spaces and tabs, returning how many were skipped.
    pub fn skip_spaces(&mut self) -> usize {
        let start = self.i;
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.i += 1;
        }
        self.i - start
    }

    /// Returns true if only spaces and tabs remain on the line.
    pub fn rest_is_blank(&self) -> bool {
        self.rest().bytes().all(|b| b == b' ' || b == b'\t')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = LineCursor::new("::: image", 10);
        assert_eq!(cur.pos(), 10);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b':'));
        assert_eq!(cur.bump(), Some(b':'));
        assert_eq!(cur.pos(), 11);
    }

    #[test]
    fn skip_spaces_stops_at_content() {
        let mut cur = LineCursor::new(" \t  :::", 0);
        assert_eq!(cur.skip_spaces(), 4);
        assert_eq!(cur.peek(), Some(b':'));
        assert_eq!(cur.skip_spaces(), 0);
    }

    #[test]
    fn skip_spaces_never_leaves_the_line() {
        let mut cur = LineCursor::new("   ", 0);
        assert_eq!(cur.skip_spaces(), 3);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn starts_with_ignore_case_matches_mixed_case() {
        let cur = LineCursor::new("IMage source", 0);
        assert!(cur.starts_with_ignore_case("image"));
        assert!(!cur.starts_with_ignore_case("image-end"));
    }

    #[test]
    fn starts_with_ignore_case_longer_than_remaining() {
        let cur = LineCursor::new("ima", 0);
        assert!(!cur.starts_with_ignore_case("image"));
    }

    #[test]
    fn column_counts_characters_not_bytes() {
        let mut cur = LineCursor::new("é:::", 0);
        cur.bump_n(2);
        assert_eq!(cur.column(), 1);
        assert_eq!(cur.pos(), 2);
    }

    #[test]
    fn bump_n_clamps_to_line_end() {
        let mut cur = LineCursor::new("hi", 0);
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.rest(), "");
    }

    #[test]
    fn saved_cursor_restores_position() {
        let mut cur = LineCursor::new("abc", 0);
        let saved = cur.clone();
        cur.bump_n(2);
        cur = saved;
        assert_eq!(cur.peek(), Some(b'a'));
    }

    #[test]
    fn rest_is_blank_after_trailing_spaces() {
        let mut cur = LineCursor::new(":::  \t", 0);
        cur.bump_n(3);
        assert!(cur.rest_is_blank());
        let cur = LineCursor::new("::: !", 0);
        assert!(!cur.rest_is_blank());
    }
}
