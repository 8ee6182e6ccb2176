//! Base-31 polynomial hashing for strings

use std::hash::{BuildHasherDefault, Hasher};

/// Multiplier of the polynomial recurrence `h = 31 * h + unit`
const MULTIPLIER: u32 = 31;

/// Clears the sign bit of a 32-bit hash
const SIGN_MASK_32: u32 = 0x7FFF_FFFF;

/// Hashes a string over its UTF-16 code units with `h = 31 * h + unit`.
///
/// Arithmetic wraps at 32 bits; the sign bit of the result is cleared so the
/// value can be reduced modulo a table size directly.
#[must_use]
pub fn string_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(MULTIPLIER).wrapping_add(u32::from(unit))) &
        SIGN_MASK_32
}

/// [`Hasher`] applying the base-31 recurrence to every written byte.
///
/// Its values are not those of [`string_hash`]: it runs over UTF-8 bytes in
/// 64 bits without masking, and hashing a `str` also writes a trailing `0xff`
/// byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialHasher {
    /// Running hash value
    state: u64,
}

impl Hasher for PolynomialHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = self.state.wrapping_mul(u64::from(MULTIPLIER)).wrapping_add(u64::from(byte));
        }
    }
}

/// Builds [`PolynomialHasher`]s; pass it as the hasher of a
/// [`ChainedHashTable`](crate::ChainedHashTable) for routing that is the same
/// on every run. Routing does not follow [`string_hash`].
pub type BuildPolynomialHasher = BuildHasherDefault<PolynomialHasher>;

#[cfg(test)]
mod tests {
    use std::hash::BuildHasher;

    use super::*;
    use crate::ChainedHashTable;

    #[test]
    fn test_string_hash_known_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
        assert_eq!(string_hash("hello"), 99_162_322);
    }

    #[test]
    fn test_string_hash_is_non_negative_after_overflow() {
        // "polygenelubricants" wraps to i32::MIN under 32-bit arithmetic
        assert_eq!(string_hash("polygenelubricants"), 0);
        let long = "the quick brown fox jumps over the lazy dog".repeat(8);
        assert!(string_hash(&long) <= SIGN_MASK_32);
    }

    #[test]
    fn test_string_hash_uses_utf16_units() {
        // U+00E9 is a single UTF-16 unit but two UTF-8 bytes
        assert_eq!(string_hash("\u{e9}"), 0xE9);
    }

    #[test]
    fn test_polynomial_hasher_bytes() {
        let mut hasher = PolynomialHasher::default();
        hasher.write(b"ab");
        assert_eq!(hasher.finish(), 97 * 31 + 98);
    }

    #[test]
    fn test_polynomial_hasher_is_reproducible() {
        let build = BuildPolynomialHasher::default();
        assert_eq!(build.hash_one("bucket"), build.hash_one("bucket"));
        assert_ne!(build.hash_one("bucket"), build.hash_one("buckets"));
    }

    #[test]
    fn test_polynomial_hasher_differs_from_string_hash() {
        let build = BuildPolynomialHasher::default();
        // `str` hashing appends 0xff after the bytes
        assert_eq!(build.hash_one("hello"), u64::from(string_hash("hello")) * 31 + 0xff);
        assert_eq!(build.hash_one("hello"), 3_074_032_237);
        // UTF-8 bytes rather than one UTF-16 unit
        assert_eq!(build.hash_one("\u{e9}"), (0xC3 * 31 + 0xA9) * 31 + 0xff);
        assert_ne!(build.hash_one("\u{e9}"), u64::from(string_hash("\u{e9}")));
    }

    #[test]
    fn test_as_table_hasher() {
        let mut table: ChainedHashTable<String, usize, BuildPolynomialHasher> =
            ChainedHashTable::with_hasher(4, BuildPolynomialHasher::default());
        for (i, word) in ["alpha", "beta", "gamma", "delta", "epsilon"].iter().enumerate() {
            table.insert((*word).to_string(), i);
        }

        assert_eq!(table.get("gamma"), Some(&2));
        assert_eq!(table.capacity(), 8);
        let expected = BuildPolynomialHasher::default().hash_one("delta") % 8;
        assert_eq!(table.route("delta") as u64, expected);
    }
}
