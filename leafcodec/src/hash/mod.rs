//! Items relating to hashing data
//!
//! In particular, the [`Digest`] type, and the leaf and node hashing rules of the tree

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use sha3::Digest as _;

use crate::Error;

#[cfg(any(test, feature = "proptest"))]
mod proptest_impls;
mod serde_impls;

/// A Keccak-256 digest
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digest([u8; 32]);

impl Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Digest {
    /// The length of this hash in bytes
    pub const LEN: usize = 32;

    /// Create a [`Digest`] from its byte array representation
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Get the representation of this hash as a byte array
    #[inline]
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; Self::LEN] {
        self.0
    }

    /// Calculate the Keccak-256 hash of the given bytes
    ///
    /// ```rust
    /// # use leafcodec::Digest;
    /// let empty = Digest::calculate(&[]);
    /// assert_eq!(
    ///     empty.to_string(),
    ///     "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn calculate(bytes: &[u8]) -> Self {
        Self(sha3::Keccak256::digest(bytes).into())
    }

    /// The hash of a leaf's encoded bytes
    ///
    /// Leaves are hashed twice, so a leaf hash can never be confused with the hash of two
    /// concatenated interior nodes
    #[inline]
    #[must_use]
    pub fn leaf(encoded: &[u8]) -> Self {
        let inner = Self::calculate(encoded);
        Self::calculate(&inner.0)
    }

    /// The hash of an interior node with children `a` and `b`
    ///
    /// The children are concatenated smallest first, so the result doesn't depend on which side
    /// each child is on
    #[must_use]
    pub fn hash_pair(a: &Self, b: &Self) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let mut bytes = [0; 2 * Self::LEN];
        bytes[..Self::LEN].copy_from_slice(&low.0);
        bytes[Self::LEN..].copy_from_slice(&high.0);

        Self::calculate(&bytes)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_32(s).map(Self)
    }
}

/// Parse exactly 32 bytes of hex, with an optional `0x` prefix
pub(crate) fn parse_hex_32(s: &str) -> Result<[u8; 32], Error> {
    let digits = s.strip_prefix("0x").unwrap_or(s);

    let mut bytes = [0; 32];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| Error::InvalidHex(format!("{s:?}: {e}")))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use proptest::prop_assert_eq;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn display_is_prefixed_lowercase_hex() {
        let digest = Digest::from_bytes([0xab; 32]);
        assert_eq!(digest.to_string(), format!("0x{}", "ab".repeat(32)));
    }

    #[test]
    fn parses_with_and_without_prefix() {
        let upper = format!("0x{}", "AB".repeat(32));
        let bare = "ab".repeat(32);

        assert_eq!(upper.parse::<Digest>().unwrap(), Digest::from_bytes([0xab; 32]));
        assert_eq!(bare.parse::<Digest>().unwrap(), Digest::from_bytes([0xab; 32]));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!("0x1234".parse::<Digest>(), Err(Error::InvalidHex(_))));
        assert!(matches!("0xzz".parse::<Digest>(), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn leaf_hash_is_double_keccak() {
        let once = Digest::calculate(b"hello");
        let twice = Digest::calculate(&once.to_bytes());

        assert_eq!(Digest::leaf(b"hello"), twice);
        assert_ne!(Digest::leaf(b"hello"), once);
    }

    #[test]
    fn pair_hash_is_sorted_concatenation() {
        let low = Digest::from_bytes([0x01; 32]);
        let high = Digest::from_bytes([0xfe; 32]);

        let mut bytes = [0x01; 64];
        bytes[32..].copy_from_slice(&[0xfe; 32]);

        assert_eq!(Digest::hash_pair(&low, &high), Digest::calculate(&bytes));
    }

    #[proptest]
    fn pair_hash_is_commutative(a: Digest, b: Digest) {
        prop_assert_eq!(Digest::hash_pair(&a, &b), Digest::hash_pair(&b, &a));
    }

    #[proptest]
    fn digest_string_round_trip(digest: Digest) {
        let digest_again: Digest = digest.to_string().parse().unwrap();
        prop_assert_eq!(digest, digest_again);
    }

    #[proptest]
    fn digest_serde_round_trip(digest: Digest) {
        let json = serde_json::to_string(&digest).unwrap();
        let digest_again: Digest = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(digest, digest_again);
    }
}
