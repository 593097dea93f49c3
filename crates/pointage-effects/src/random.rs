//! Random effect handler
//!
//! This is the one place in the workspace that calls `rand::thread_rng()`.

use async_trait::async_trait;
use pointage_core::effects::RandomEffects;
use rand::{Rng, RngCore};

/// Real random handler backed by the thread-local CSPRNG
#[derive(Debug, Clone, Default)]
pub struct RealRandomHandler;

impl RealRandomHandler {
    /// Create a new real random handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RandomEffects for RealRandomHandler {
    async fn random_bytes(&self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes
    }

    async fn random_range(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..high)
    }
}
