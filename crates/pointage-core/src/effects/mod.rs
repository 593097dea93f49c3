//! Core effect trait definitions
//!
//! Pure trait definitions for the side effects Pointage performs. This module
//! defines **what** effects can be performed; handlers define **how**.
//!
//! - Production handlers live in `pointage-effects`
//! - Deterministic test handlers live in `pointage-testkit`
//!
//! Domain crates take these traits as `Arc<dyn ...>` constructor arguments so
//! the composition root decides which handlers are wired in.

pub mod random;
pub mod storage;
pub mod time;

pub use random::RandomEffects;
pub use storage::{StorageEffects, StorageError};
pub use time::{PhysicalTime, PhysicalTimeEffects};
