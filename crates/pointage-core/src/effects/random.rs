//! Randomness effect interface

use async_trait::async_trait;

/// Source of randomness
///
/// Production handlers draw from the OS; test handlers are seeded or scripted
/// so password and identifier generation can be asserted on.
#[async_trait]
pub trait RandomEffects: Send + Sync {
    /// Fill a fresh buffer of `len` random bytes
    async fn random_bytes(&self, len: usize) -> Vec<u8>;

    /// Uniform integer in `[low, high)`. `high` must be greater than `low`.
    async fn random_range(&self, low: u64, high: u64) -> u64;

    /// Sixteen random bytes, the size of a UUID
    async fn random_bytes_16(&self) -> [u8; 16] {
        let bytes = self.random_bytes(16).await;
        let mut out = [0u8; 16];
        for (dst, src) in out.iter_mut().zip(bytes) {
            *dst = src;
        }
        out
    }
}
