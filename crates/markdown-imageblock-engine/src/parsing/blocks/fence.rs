use crate::parsing::cursor::LineCursor;

/// Colon fences delimiting extension blocks (`:::`, `::::`, ...).
///
/// All fence syntax knowledge lives here: the marker, the minimum run, and
/// the case-insensitive keyword matching used right after a fence.
pub struct Fence;

impl Fence {
    /// The fence marker character.
    pub const MARKER: u8 = b':';
    /// Shortest run that counts as a fence.
    pub const MIN_LEN: usize = 3;

    /// Counts the marker run at the cursor and consumes it.
    ///
    /// Returns `None`, leaving the cursor untouched, when the run is shorter
    /// than [`Fence::MIN_LEN`]. The caller skips leading spaces first.
    pub fn count(cur: &mut LineCursor<'_>) -> Option<usize> {
        let len = cur
            .rest()
            .bytes()
            .take_while(|&b| b == Self::MARKER)
            .count();
        if len < Self::MIN_LEN {
            return None;
        }
        cur.bump_n(len);
        Some(len)
    }

    /// Skips spaces and matches a fence of exactly `len` markers.
    ///
    /// A longer or shorter run does not match.
    pub fn match_exact(cur: &mut LineCursor<'_>, len: usize) -> bool {
        let saved = cur.clone();
        cur.skip_spaces();
        match Self::count(cur) {
            Some(n) if n == len => true,
            _ => {
                *cur = saved;
                false
            }
        }
    }

    /// Matches `keyword` at the cursor ignoring ASCII case, consuming it.
    pub fn match_keyword(cur: &mut LineCursor<'_>, keyword: &str) -> bool {
        if cur.starts_with_ignore_case(keyword) {
            cur.bump_n(keyword.len());
            true
        } else {
            false
        }
    }
}
