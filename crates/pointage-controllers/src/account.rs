//! Controller account and registry types

use chrono::{DateTime, Utc};
use pointage_core::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A persisted controller account
///
/// Field names on the wire match the registry format written by the mobile
/// application: `id`, `agentId`, `password` (the digest), `name`, `isActive`,
/// `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerAccount {
    /// Opaque storage identifier, never shown to users
    pub id: String,
    /// 4-digit login identifier
    pub agent_id: AgentId,
    /// Digest of the PIN, never the PIN itself
    #[serde(rename = "password")]
    pub password_digest: String,
    /// Display name
    pub name: String,
    /// `false` once soft-deleted
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl ControllerAccount {
    /// Public view of the account
    pub fn status(&self) -> AccountStatus {
        AccountStatus {
            agent_id: self.agent_id.clone(),
            name: self.name.clone(),
            is_active: self.is_active,
        }
    }

    /// Digest-free summary for diagnostics
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            agent_id: self.agent_id.clone(),
            name: self.name.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            has_password: !self.password_digest.is_empty(),
        }
    }
}

/// Result of looking up an agent ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    /// The agent ID looked up
    pub agent_id: AgentId,
    /// Display name
    pub name: String,
    /// Whether the account can log in
    pub is_active: bool,
}

/// Per-account line of the store diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Agent ID
    pub agent_id: AgentId,
    /// Display name
    pub name: String,
    /// Whether the account can log in
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Whether a digest is stored
    pub has_password: bool,
}

/// The full collection of controller accounts, in insertion order
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    accounts: Vec<ControllerAccount>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, keeping the first account for any repeated agent ID.
    /// Returns the registry and the number of accounts dropped.
    ///
    /// Repeated opaque ids are kept; see [`Registry::repeated_id_positions`].
    pub fn from_accounts(accounts: impl IntoIterator<Item = ControllerAccount>) -> (Self, usize) {
        let mut registry = Self::new();
        let mut dropped = 0;
        for account in accounts {
            if registry.contains_agent_id(&account.agent_id) {
                dropped += 1;
                continue;
            }
            registry.accounts.push(account);
        }
        (registry, dropped)
    }

    /// Number of accounts, active or not
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether there are no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Number of active accounts
    pub fn active_count(&self) -> usize {
        self.accounts.iter().filter(|a| a.is_active).count()
    }

    /// Accounts in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ControllerAccount> {
        self.accounts.iter()
    }

    /// Account with this agent ID, active or not
    pub fn find(&self, agent_id: &AgentId) -> Option<&ControllerAccount> {
        self.accounts.iter().find(|a| &a.agent_id == agent_id)
    }

    pub(crate) fn find_mut(&mut self, agent_id: &AgentId) -> Option<&mut ControllerAccount> {
        self.accounts.iter_mut().find(|a| &a.agent_id == agent_id)
    }

    pub(crate) fn accounts_mut(&mut self) -> impl Iterator<Item = &mut ControllerAccount> {
        self.accounts.iter_mut()
    }

    /// Whether any account, active or not, uses this agent ID
    pub fn contains_agent_id(&self, agent_id: &AgentId) -> bool {
        self.find(agent_id).is_some()
    }

    /// Whether any account uses this opaque id
    pub fn contains_id(&self, id: &str) -> bool {
        self.accounts.iter().any(|a| a.id == id)
    }

    /// Positions of accounts whose opaque id already appears earlier
    pub fn repeated_id_positions(&self) -> Vec<usize> {
        let mut seen = HashSet::new();
        self.accounts
            .iter()
            .enumerate()
            .filter(|(_, a)| !seen.insert(a.id.as_str()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Replace the opaque id of the account at `index`, returning the old one
    pub(crate) fn rekey(&mut self, index: usize, id: String) -> Option<String> {
        self.accounts
            .get_mut(index)
            .map(|account| std::mem::replace(&mut account.id, id))
    }

    /// Numeric values of every agent ID, active or not
    pub fn agent_numbers(&self) -> BTreeSet<u32> {
        self.accounts.iter().map(|a| a.agent_id.number()).collect()
    }

    /// Copy of the accounts sorted by agent ID
    pub fn sorted(&self) -> Vec<ControllerAccount> {
        let mut accounts = self.accounts.clone();
        accounts.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));
        accounts
    }

    /// Append an account. Callers check uniqueness first.
    pub(crate) fn push(&mut self, account: ControllerAccount) {
        debug_assert!(!self.contains_agent_id(&account.agent_id));
        self.accounts.push(account);
    }
}
