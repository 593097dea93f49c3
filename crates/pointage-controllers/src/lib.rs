//! # Pointage Controllers - Controller Identity Store
//!
//! **Purpose**: Own the registry of controller accounts: the numeric-credentialed
//! operators who log into the attendance app.
//!
//! The crate is built leaves first:
//!
//! - [`passwords`]: 4-digit PIN generation that avoids guessable patterns
//! - [`allocator`]: next free agent ID in `1001..=9999`
//! - [`persistence`]: whole-registry load/save under a single storage key
//! - [`store`]: the [`ControllerStore`], which composes the above with the
//!   credential hasher and exposes create/authenticate/update/deactivate
//!
//! All side effects go through the traits in `pointage_core::effects`; the
//! composition root decides which handlers back them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Controller account and registry types
pub mod account;

/// Agent ID allocation
pub mod allocator;

/// Store error types
pub mod error;

/// PIN generation
pub mod passwords;

/// Registry persistence
pub mod persistence;

/// The controller store
pub mod store;

pub use account::{AccountStatus, AccountSummary, ControllerAccount, Registry};
pub use allocator::{allocate_agent_id, department_base, suggest_agent_id};
pub use error::{ControllerError, Result};
pub use passwords::PasswordGenerator;
pub use persistence::{RegistryPersistence, DEFAULT_REGISTRY_KEY};
pub use store::{ControllerStore, ControllerStoreBuilder, ControllerUpdate, StoreDiagnostics};
