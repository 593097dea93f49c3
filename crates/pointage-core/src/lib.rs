//! # Pointage Core - Foundation
//!
//! **Purpose**: Define the credential types, the credential hashing contract,
//! and the effect interfaces every other Pointage crate is written against.
//!
//! # Architecture Constraints
//!
//! - YES Credential newtypes and their format rules
//! - YES Pure functions (hashing, validation)
//! - YES Effect trait definitions (storage, randomness, physical time)
//! - NO effect handler implementations (use `pointage-effects`)
//! - NO test doubles (use `pointage-testkit`)
//! - NO registry or attendance logic (domain crates)
//!
//! ## Core Concepts
//!
//! - **Agent ID**: the 4-digit human-facing login identifier of a controller
//! - **PIN**: the raw 4-digit credential, only ever held transiently
//! - **Digest**: the stored transform of a PIN, produced by a [`CredentialHasher`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Agent ID and PIN newtypes with 4-digit format validation
pub mod credentials;

/// Credential hashing contract and the checksum digest
pub mod hash;

/// Pure effect interfaces (no implementations)
pub mod effects;

pub use credentials::{is_four_digits, AgentId, CredentialField, FormatError, Pin};
pub use effects::{
    PhysicalTime, PhysicalTimeEffects, RandomEffects, StorageEffects, StorageError,
};
pub use hash::{ChecksumHasher, CredentialHasher};
