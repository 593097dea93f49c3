//! Credential newtypes
//!
//! Controllers log in with two 4-digit numeric strings: a public agent ID and
//! a secret PIN. Both are validated at construction so the rest of the
//! workspace can rely on the format.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Width of every controller credential
pub const CREDENTIAL_WIDTH: usize = 4;

/// Returns true when `value` is exactly four ASCII digits.
pub fn is_four_digits(value: &str) -> bool {
    value.len() == CREDENTIAL_WIDTH && value.bytes().all(|b| b.is_ascii_digit())
}

/// Which credential failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialField {
    /// The public agent identifier
    AgentId,
    /// The secret PIN
    Password,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialField::AgentId => write!(f, "agent ID"),
            CredentialField::Password => write!(f, "password"),
        }
    }
}

/// A credential did not match `^\d{4}$`.
///
/// Carries only the field, never the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} must contain exactly 4 digits")]
pub struct FormatError {
    /// The credential that was rejected
    pub field: CredentialField,
}

/// A 4-digit controller identifier such as `1001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentId(String);

impl AgentId {
    /// Validate and wrap an agent identifier
    pub fn parse(value: &str) -> Result<Self, FormatError> {
        if is_four_digits(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(FormatError {
                field: CredentialField::AgentId,
            })
        }
    }

    /// Build an identifier from its numeric value, zero-padded to 4 digits.
    ///
    /// Returns `None` above 9999.
    pub fn from_number(value: u32) -> Option<Self> {
        if value > 9999 {
            return None;
        }
        Some(Self(format!("{value:04}")))
    }

    /// Numeric value of the identifier
    pub fn number(&self) -> u32 {
        // Format is validated at construction.
        self.0.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    }

    /// String form of the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AgentId {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.0
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A raw 4-digit PIN.
///
/// The buffer is wiped on drop and the `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Pin(String);

impl Pin {
    /// Validate and wrap a PIN
    pub fn parse(value: &str) -> Result<Self, FormatError> {
        if is_four_digits(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(FormatError {
                field: CredentialField::Password,
            })
        }
    }

    /// Expose the raw digits, for hashing only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}
