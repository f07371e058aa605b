/// Number of hex digits kept from the digest.
pub const ID_LEN: usize = 5;

/// Derives a short anchor id for a block from where it opens.
///
/// The key `"{document}-{line}-{column}"` is hashed, the first 128 bits of
/// the digest are rendered as 32 lowercase hex digits and cut to
/// [`ID_LEN`]. The result is deterministic but not unique across a corpus.
pub fn block_id(document: &str, line: usize, column: usize) -> String {
    let key = format!("{document}-{line}-{column}");
    let hash = blake3::hash(key.as_bytes());

    let mut digest = [0u8; 16];
    digest.copy_from_slice(&hash.as_bytes()[..16]);
    let hex = format!("{:032x}", u128::from_be_bytes(digest));

    hex[..ID_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_five_lowercase_hex_digits() {
        let id = block_id("docs/index.md", 3, 0);
        assert_eq!(id.len(), ID_LEN);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn same_inputs_same_id() {
        assert_eq!(block_id("a.md", 10, 2), block_id("a.md", 10, 2));
    }

    #[test]
    fn each_input_changes_the_id() {
        let base = block_id("a.md", 10, 2);
        assert_ne!(base, block_id("b.md", 10, 2));
        assert_ne!(base, block_id("a.md", 11, 2));
        assert_ne!(base, block_id("a.md", 10, 3));
    }

    #[test]
    fn prefix_of_full_blake3_hex() {
        let full = blake3::hash(b"a.md-10-2").to_hex();
        assert_eq!(block_id("a.md", 10, 2), &full.as_str()[..ID_LEN]);
    }
}
