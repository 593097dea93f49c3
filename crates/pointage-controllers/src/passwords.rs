//! PIN generation
//!
//! PINs are uniform 4-digit draws, re-drawn while they land on an easily
//! guessed pattern. Generation never fails: after [`MAX_ATTEMPTS`] rejected
//! draws the last one is returned as is.

use pointage_core::RandomEffects;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Codes never offered unless the retry budget runs out
pub const DENYLIST: [&str; 18] = [
    "0000", "1111", "2222", "3333", "4444", "5555", "6666", "7777", "8888", "9999", "1234",
    "4321", "0123", "3210", "1357", "2468", "1212", "1010",
];

/// Draws per PIN before accepting a denylisted code
pub const MAX_ATTEMPTS: usize = 100;

/// Options offered when the caller does not say
pub const DEFAULT_OPTION_COUNT: usize = 3;

/// Upper bound on single draws per batch
pub const MAX_BATCH_DRAWS: usize = 1000;

const PIN_SPACE: u64 = 10_000;

/// Whether `code` is one of the guessable patterns
pub fn is_denylisted(code: &str) -> bool {
    DENYLIST.contains(&code)
}

/// Generates 4-digit PINs from an injected randomness source
#[derive(Clone)]
pub struct PasswordGenerator {
    random: Arc<dyn RandomEffects>,
}

impl PasswordGenerator {
    /// Create a generator drawing from `random`
    pub fn new(random: Arc<dyn RandomEffects>) -> Self {
        Self { random }
    }

    /// One PIN, avoiding the denylist when possible
    pub async fn generate(&self) -> String {
        let mut code = self.draw().await;
        let mut attempts = 1;
        while is_denylisted(&code) && attempts < MAX_ATTEMPTS {
            code = self.draw().await;
            attempts += 1;
        }
        if is_denylisted(&code) {
            warn!(attempts, "PIN retry budget exhausted, returning denylisted code");
        }
        code
    }

    /// `count` distinct PINs, in draw order.
    ///
    /// The batch stops after [`MAX_BATCH_DRAWS`] draws, so a source that keeps
    /// repeating itself, or a `count` near the size of the PIN space, yields
    /// fewer codes. A short batch is logged.
    pub async fn generate_options(&self, count: usize) -> Vec<String> {
        let wanted = count;
        let capacity = wanted.min(MAX_BATCH_DRAWS);
        let mut seen = HashSet::with_capacity(capacity);
        let mut codes = Vec::with_capacity(capacity);
        let mut draws = 0;

        while codes.len() < wanted && draws < MAX_BATCH_DRAWS {
            draws += 1;
            let code = self.generate().await;
            if seen.insert(code.clone()) {
                codes.push(code);
            }
        }

        if codes.len() < wanted {
            warn!(
                wanted,
                produced = codes.len(),
                "PIN batch stopped at draw limit"
            );
        }
        codes
    }

    async fn draw(&self) -> String {
        format!("{:04}", self.random.random_range(0, PIN_SPACE).await)
    }
}

impl std::fmt::Debug for PasswordGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordGenerator").finish_non_exhaustive()
    }
}
