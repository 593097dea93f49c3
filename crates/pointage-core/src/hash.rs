//! Credential hashing
//!
//! [`ChecksumHasher`] is a 32-bit rolling polynomial checksum, unsalted and
//! trivially invertible over the 10 000-value PIN space. Existing registries
//! were written with it. A slow salted hash can replace it through
//! [`CredentialHasher`].

/// Maps a raw credential to its stored digest.
pub trait CredentialHasher: Send + Sync {
    /// Produce the digest for `secret`. Must be pure and deterministic.
    fn digest(&self, secret: &str) -> String;
}

/// Rolling `h * 31 + unit` checksum over UTF-16 code units, rendered as the
/// decimal absolute value of the wrapped 32-bit accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecksumHasher;

impl ChecksumHasher {
    /// Create the checksum hasher
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for ChecksumHasher {
    fn digest(&self, secret: &str) -> String {
        let mut acc: i32 = 0;
        for unit in secret.encode_utf16() {
            acc = acc
                .wrapping_shl(5)
                .wrapping_sub(acc)
                .wrapping_add(i32::from(unit));
        }
        // i64 so that i32::MIN renders as 2147483648
        i64::from(acc).abs().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_digests() {
        let hasher = ChecksumHasher::new();
        assert_eq!(hasher.digest("0000"), "1477632");
        assert_eq!(hasher.digest("1234"), "1509442");
        assert_eq!(hasher.digest("4821"), "1604547");
        assert_eq!(hasher.digest(""), "0");
    }

    #[test]
    fn test_pin_digests_never_look_like_pins() {
        let hasher = ChecksumHasher::new();
        for n in 0..10_000u32 {
            let pin = format!("{n:04}");
            let digest = hasher.digest(&pin);
            assert!(!digest.is_empty());
            assert!(digest.len() > 4, "digest of {pin} is {digest}");
        }
    }

    #[test]
    fn test_pin_digests_are_distinct() {
        let hasher = ChecksumHasher::new();
        let digests: std::collections::HashSet<String> =
            (0..10_000u32).map(|n| hasher.digest(&format!("{n:04}"))).collect();
        assert_eq!(digests.len(), 10_000);
    }

    proptest! {
        #[test]
        fn digest_is_deterministic(secret in ".*") {
            let hasher = ChecksumHasher::new();
            prop_assert_eq!(hasher.digest(&secret), hasher.digest(&secret));
        }

        #[test]
        fn digest_is_unsigned_decimal(secret in "[ -~]{1,64}") {
            let digest = ChecksumHasher::new().digest(&secret);
            prop_assert!(!digest.is_empty());
            prop_assert!(digest.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
