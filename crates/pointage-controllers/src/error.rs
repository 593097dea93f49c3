//! Controller store errors

use pointage_core::{CredentialField, FormatError, StorageError};

/// Errors raised by the controller store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// An agent ID or password is not exactly 4 digits
    #[error("{field} must contain exactly 4 digits")]
    InvalidFormat {
        /// The credential that was rejected
        field: CredentialField,
    },

    /// `create` with an agent ID already present, active or not
    #[error("Agent ID {agent_id} already exists")]
    DuplicateId {
        /// The conflicting agent ID
        agent_id: String,
    },

    /// No account has this agent ID
    #[error("No controller with agent ID {agent_id}")]
    NotFound {
        /// The agent ID that was looked up
        agent_id: String,
    },

    /// Every ID in 1001-9999 is taken
    #[error("All agent IDs are in use (1001-9999)")]
    ExhaustedRange,

    /// Every opaque id drawn for a new account was already taken
    #[error("No unused account id after {attempts} draws")]
    IdCollision {
        /// Number of ids drawn
        attempts: usize,
    },

    /// The registry could not be written
    #[error("Registry storage unavailable: {reason}")]
    PersistenceUnavailable {
        /// Backend failure description
        reason: String,
    },

    /// The task running a mutation panicked or was aborted
    #[error("Store operation interrupted: {reason}")]
    Interrupted {
        /// Join failure description
        reason: String,
    },
}

/// Controller store result type
pub type Result<T> = std::result::Result<T, ControllerError>;

impl ControllerError {
    /// Create a not-found error
    pub fn not_found(agent_id: impl Into<String>) -> Self {
        Self::NotFound {
            agent_id: agent_id.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(reason: impl Into<String>) -> Self {
        Self::PersistenceUnavailable {
            reason: reason.into(),
        }
    }
}

impl From<FormatError> for ControllerError {
    fn from(err: FormatError) -> Self {
        Self::InvalidFormat { field: err.field }
    }
}

impl From<StorageError> for ControllerError {
    fn from(err: StorageError) -> Self {
        Self::persistence(err.to_string())
    }
}
