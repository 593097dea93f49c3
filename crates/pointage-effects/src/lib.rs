//! # Pointage Effects - Production Handlers
//!
//! Stateless implementations of the effect traits from `pointage-core`,
//! delegating to the filesystem, the OS random number generator and the
//! system clock.
//!
//! **Constraint**: NO mock handlers here; deterministic doubles belong in
//! `pointage-testkit`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// OS-backed randomness
pub mod random;

/// Filesystem-backed storage
pub mod storage;

/// System clock
pub mod time;

pub use random::RealRandomHandler;
pub use storage::FilesystemStorageHandler;
pub use time::RealTimeHandler;
