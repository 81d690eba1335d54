//! Movement (proposed relocation) model.
//!
//! Movements are derived on demand from the layout and current occupancy;
//! nothing in the crate stores them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{AircraftId, BayId};

/// A proposed tow from one bay to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Aircraft being towed.
    pub aircraft_id: AircraftId,
    pub from_bay: BayId,
    pub to_bay: BayId,
    /// Estimated towing cost in dollars.
    pub cost: u64,
    /// Occupied bays that must be cleared first.
    pub dependencies: BTreeSet<BayId>,
}

impl Movement {
    /// Whether the tow can proceed without clearing other bays.
    pub fn is_unblocked(&self) -> bool {
        self.dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_unblocked() {
        let mut m = Movement {
            aircraft_id: "ac-1".into(),
            from_bay: "1".into(),
            to_bay: "C".into(),
            cost: 300,
            dependencies: BTreeSet::new(),
        };
        assert!(m.is_unblocked());

        m.dependencies.insert("A".into());
        assert!(!m.is_unblocked());
    }
}
