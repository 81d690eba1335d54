//! Facility utilization metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Efficiency | round(occupied / total × 100) |
//! | Utilization by kind | occupied / count per effective bay kind |

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::BayKind;
use crate::registry::Registry;

/// Bay count and occupancy for one bay kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindUtilization {
    pub count: usize,
    pub occupied: usize,
}

impl KindUtilization {
    /// Occupied fraction (0.0..=1.0); 0 for an empty kind.
    pub fn rate(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.occupied as f64 / self.count as f64
        }
    }
}

/// Snapshot of facility occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityStats {
    pub total_bays: usize,
    pub occupied_bays: usize,
    pub available_bays: usize,
    pub aircraft_count: usize,
    /// Occupied share of all bays, as a rounded percentage.
    pub efficiency: u32,
    /// Keyed by effective kind, so MTE bays count as In.
    pub utilization: BTreeMap<BayKind, KindUtilization>,
}

impl FacilityStats {
    /// Computes occupancy metrics from the registry.
    pub fn calculate(registry: &Registry) -> Self {
        let bays = registry.bays();
        let mut utilization: BTreeMap<BayKind, KindUtilization> = BTreeMap::new();
        let mut occupied = 0;

        for bay in bays {
            let entry = utilization.entry(bay.effective_kind()).or_default();
            entry.count += 1;
            if bay.is_occupied() {
                entry.occupied += 1;
                occupied += 1;
            }
        }

        let total = bays.len();
        let efficiency = if total == 0 {
            0
        } else {
            (occupied as f64 / total as f64 * 100.0).round() as u32
        };

        Self {
            total_bays: total,
            occupied_bays: occupied,
            available_bays: total - occupied,
            aircraft_count: registry.fleet().len(),
            efficiency,
            utilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Aircraft, AircraftSize, WorkType};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_facility() {
        let stats = FacilityStats::calculate(&Registry::standard());
        assert_eq!(stats.total_bays, 23);
        assert_eq!(stats.occupied_bays, 0);
        assert_eq!(stats.available_bays, 23);
        assert_eq!(stats.efficiency, 0);
        assert_eq!(stats.utilization[&BayKind::Paint].count, 4);
        assert_eq!(stats.utilization[&BayKind::In].count, 3);
        assert_eq!(stats.utilization[&BayKind::Special].count, 1);
        assert_eq!(stats.utilization[&BayKind::Outer].count, 15);
    }

    #[test]
    fn test_occupancy_and_mte() {
        let mut r = Registry::standard();
        r.insert_aircraft(Aircraft::new("a", "B-A", AircraftSize::Large, WorkType::Paint, at(8), at(16)))
            .unwrap();
        r.insert_aircraft(Aircraft::new("b", "B-B", AircraftSize::Large, WorkType::Maintenance, at(8), at(16)))
            .unwrap();
        r.insert_aircraft(Aircraft::new("c", "B-C", AircraftSize::Large, WorkType::Storage, at(8), at(16)))
            .unwrap();
        r.activate_mte("A").unwrap();
        r.assign("a", "1").unwrap();
        r.assign("b", "A").unwrap();

        let stats = FacilityStats::calculate(&r);
        assert_eq!(stats.occupied_bays, 2);
        assert_eq!(stats.aircraft_count, 3);
        // 2 / 23 = 8.7% → 9
        assert_eq!(stats.efficiency, 9);
        assert_eq!(stats.utilization[&BayKind::In], KindUtilization { count: 4, occupied: 1 });
        assert_eq!(stats.utilization[&BayKind::Outer].count, 14);
        assert!((stats.utilization[&BayKind::Paint].rate() - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_serializes_kind_keys() {
        let stats = FacilityStats::calculate(&Registry::standard());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["utilization"]["paint"]["count"], 4);
        assert_eq!(json["efficiency"], 0);
    }
}
