//! # Pointage Testkit
//!
//! Deterministic effect handlers for tests:
//!
//! - [`MemoryStorageHandler`]: in-memory key-value storage
//! - [`FaultyStorage`]: wraps any storage and injects read/write failures
//!   and write latency
//! - [`MockRandomHandler`]: seeded ChaCha20 randomness
//! - [`ScriptedRandomHandler`]: replays a fixed sequence of draws
//! - [`MockTimeHandler`]: a clock that only moves when told to

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod random;
pub mod storage;
pub mod time;

pub use random::{MockRandomHandler, ScriptedRandomHandler};
pub use storage::{FaultyStorage, MemoryStorageHandler};
pub use time::{MockTimeHandler, DEFAULT_TEST_TIME_MS};
