//! Agent ID allocation
//!
//! IDs are four digits. Allocation starts at [`FIRST_AGENT_ID`]; everything
//! below it is reserved and never handed out. The result is advisory: the
//! store checks uniqueness again when the account is created.

use crate::error::{ControllerError, Result};
use pointage_core::AgentId;
use std::collections::BTreeSet;

/// First ID ever allocated
pub const FIRST_AGENT_ID: u32 = 1001;

/// Largest 4-digit ID
pub const LAST_AGENT_ID: u32 = 9999;

/// Next agent ID given the IDs already in use (active and inactive).
///
/// `max + 1`, never below [`FIRST_AGENT_ID`]. Past [`LAST_AGENT_ID`] the
/// lowest gap in `1001..=9999` is used instead; with no gap the range is
/// exhausted.
pub fn allocate_agent_id(existing: &BTreeSet<u32>) -> Result<AgentId> {
    let next = match existing.iter().next_back() {
        None => FIRST_AGENT_ID,
        Some(max) => (max + 1).max(FIRST_AGENT_ID),
    };

    let chosen = if next <= LAST_AGENT_ID {
        next
    } else {
        first_gap(existing, FIRST_AGENT_ID).ok_or(ControllerError::ExhaustedRange)?
    };

    AgentId::from_number(chosen).ok_or(ControllerError::ExhaustedRange)
}

fn first_gap(existing: &BTreeSet<u32>, from: u32) -> Option<u32> {
    (from..=LAST_AGENT_ID).find(|candidate| !existing.contains(candidate))
}

/// Numbering band for a department. Unknown departments share the IT band.
pub fn department_base(department: &str) -> u32 {
    match department.trim().to_lowercase().as_str() {
        "it" | "informatique" => 1000,
        "rh" | "ressources humaines" => 2000,
        "finance" | "comptabilité" => 3000,
        "production" | "fabrication" => 4000,
        "commercial" | "vente" => 5000,
        "marketing" | "communication" => 6000,
        "direction" | "management" => 9000,
        _ => 1000,
    }
}

/// First free ID in the department's band, scanning upward to 9999.
///
/// Falls back to [`allocate_agent_id`] when the band and everything above it
/// is taken.
pub fn suggest_agent_id(department: &str, existing: &BTreeSet<u32>) -> Result<AgentId> {
    let start = (department_base(department) + 1).max(FIRST_AGENT_ID);
    match first_gap(existing, start) {
        Some(id) => AgentId::from_number(id).ok_or(ControllerError::ExhaustedRange),
        None => allocate_agent_id(existing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ids(range: impl IntoIterator<Item = u32>) -> BTreeSet<u32> {
        range.into_iter().collect()
    }

    #[test]
    fn test_empty_registry_starts_at_1001() {
        assert_eq!(allocate_agent_id(&BTreeSet::new()).unwrap().as_str(), "1001");
    }

    #[test]
    fn test_next_after_max() {
        assert_eq!(allocate_agent_id(&ids(1001..=1005)).unwrap().as_str(), "1006");
        // Gaps below the max are not reused while there is room above
        assert_eq!(allocate_agent_id(&ids([1001, 1050])).unwrap().as_str(), "1051");
    }

    #[test]
    fn test_reserved_ids_are_never_allocated() {
        assert_eq!(allocate_agent_id(&ids([7, 42])).unwrap().as_str(), "1001");
    }

    #[test]
    fn test_wraps_to_first_gap() {
        let mut existing = ids(1001..=9999);
        existing.remove(&1002);
        assert_eq!(allocate_agent_id(&existing).unwrap().as_str(), "1002");

        assert_eq!(
            allocate_agent_id(&ids([9997, 9998, 9999])).unwrap().as_str(),
            "1001"
        );
    }

    #[test]
    fn test_exhausted_range() {
        assert_matches!(
            allocate_agent_id(&ids(1001..=9999)),
            Err(ControllerError::ExhaustedRange)
        );
        // Reserved IDs do not make room
        let mut existing = ids(1001..=9999);
        existing.insert(5);
        assert_matches!(
            allocate_agent_id(&existing),
            Err(ControllerError::ExhaustedRange)
        );
    }

    #[test]
    fn test_department_bands() {
        assert_eq!(department_base("RH"), 2000);
        assert_eq!(department_base("  Comptabilité "), 3000);
        assert_eq!(department_base("Direction"), 9000);
        assert_eq!(department_base("logistique"), 1000);
    }

    #[test]
    fn test_suggest_within_band() {
        assert_eq!(
            suggest_agent_id("finance", &BTreeSet::new()).unwrap().as_str(),
            "3001"
        );
        assert_eq!(
            suggest_agent_id("finance", &ids([3001, 3002, 3004])).unwrap().as_str(),
            "3003"
        );
        assert_eq!(
            suggest_agent_id("it", &ids([1001])).unwrap().as_str(),
            "1002"
        );
    }

    #[test]
    fn test_suggest_falls_back_when_band_full() {
        let mut existing = ids(9001..=9999);
        existing.insert(1001);
        // Direction band is full; fallback wraps to the first gap overall
        assert_eq!(
            suggest_agent_id("direction", &existing).unwrap().as_str(),
            "1002"
        );
    }
}
