//! Scoring context.

use chrono::{DateTime, Utc};
use std::fmt;

use super::ModifierSignals;
use crate::config::DEFAULT_TOWING_COST;
use crate::dependency::{DependencyResolver, OccupancyView};
use crate::layout::HangarLayout;
use crate::models::{Aircraft, AircraftSize, Bay, BayKind, Priority};

/// Read-only facility state passed to scoring factors.
///
/// `now` is injected so that a pass is deterministic for fixed inputs.
#[derive(Clone, Copy)]
pub struct ScoringContext<'a> {
    pub layout: &'a HangarLayout,
    pub occupancy: &'a dyn OccupancyView,
    /// Every aircraft known to the facility, assigned or not.
    pub fleet: &'a [Aircraft],
    pub now: DateTime<Utc>,
    pub default_towing_cost: u64,
}

impl<'a> ScoringContext<'a> {
    pub fn new(
        layout: &'a HangarLayout,
        occupancy: &'a dyn OccupancyView,
        fleet: &'a [Aircraft],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            layout,
            occupancy,
            fleet,
            now,
            default_towing_cost: DEFAULT_TOWING_COST,
        }
    }

    /// Sets the towing cost reference.
    pub fn with_default_towing_cost(mut self, cost: u64) -> Self {
        self.default_towing_cost = cost;
        self
    }

    /// Collects the situational flags used by the intelligence levels.
    pub fn signals(&self, aircraft: &Aircraft, bay: &Bay) -> ModifierSignals {
        let kind = bay.effective_kind();
        let from = aircraft.current_bay.as_deref().unwrap_or(bay.id.as_str());

        ModifierSignals {
            large_in_special: aircraft.size == AircraftSize::Large && kind == BayKind::Special,
            occupied_dependency: DependencyResolver::new(self.layout).is_blocked(
                from,
                &bay.id,
                self.occupancy,
            ),
            future_conflict: self.has_future_conflict(aircraft),
            low_priority_in_paint: kind == BayKind::Paint && aircraft.priority == Priority::Low,
            batch_peer: self.fleet.iter().any(|other| {
                other.id != aircraft.id
                    && other.work_type == aircraft.work_type
                    && other.current_bay.is_none()
            }),
        }
    }

    /// Whether any other aircraft arrives strictly between now and this
    /// aircraft's departure. Bay-agnostic: a facility-wide busyness signal.
    pub fn has_future_conflict(&self, aircraft: &Aircraft) -> bool {
        self.fleet.iter().any(|other| {
            other.id != aircraft.id
                && other.arrival_time > self.now
                && other.arrival_time < aircraft.departure_time
        })
    }
}

impl fmt::Debug for ScoringContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringContext")
            .field("fleet", &self.fleet.len())
            .field("now", &self.now)
            .field("default_towing_cost", &self.default_towing_cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftSize, WorkType};
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    fn ac(id: &str, work: WorkType, arrive: u32, depart: u32) -> Aircraft {
        Aircraft::new(id, id, AircraftSize::Large, work, at(arrive), at(depart))
    }

    #[test]
    fn test_future_conflict_excludes_self() {
        let layout = HangarLayout::standard();
        let occ: HashSet<String> = HashSet::new();
        let me = ac("me", WorkType::Paint, 8, 18);
        let fleet = vec![me.clone()];
        let ctx = ScoringContext::new(&layout, &occ, &fleet, at(6));
        assert!(!ctx.has_future_conflict(&me));
    }

    #[test]
    fn test_future_conflict_window() {
        let layout = HangarLayout::standard();
        let occ: HashSet<String> = HashSet::new();
        let me = ac("me", WorkType::Paint, 8, 12);
        let fleet = vec![
            me.clone(),
            ac("early", WorkType::Paint, 5, 9),  // arrived before now
            ac("late", WorkType::Paint, 12, 20), // arrives exactly at departure
        ];
        let ctx = ScoringContext::new(&layout, &occ, &fleet, at(6));
        assert!(!ctx.has_future_conflict(&me));

        let fleet = vec![me.clone(), ac("mid", WorkType::Storage, 10, 20)];
        let ctx = ScoringContext::new(&layout, &occ, &fleet, at(6));
        assert!(ctx.has_future_conflict(&me));
    }

    #[test]
    fn test_signals() {
        let layout = HangarLayout::standard();
        let occ: HashSet<String> = ["A".to_string()].into_iter().collect();
        let me = ac("me", WorkType::Maintenance, 8, 12).with_priority(Priority::Low);
        let fleet = vec![me.clone(), ac("peer", WorkType::Maintenance, 20, 22)];
        let ctx = ScoringContext::new(&layout, &occ, &fleet, at(6));

        let s = ctx.signals(&me, &Bay::paint("1"));
        assert!(s.occupied_dependency); // A is adjacent to 1
        assert!(s.low_priority_in_paint);
        assert!(s.batch_peer);
        assert!(!s.large_in_special);
        assert!(!s.future_conflict);

        let s = ctx.signals(&me, &Bay::special("5"));
        assert!(s.large_in_special);
        assert!(!s.occupied_dependency);
        assert!(!s.low_priority_in_paint);
    }

    #[test]
    fn test_dependency_from_current_bay() {
        let layout = HangarLayout::standard();
        let occ: HashSet<String> = ["3".to_string(), "2".to_string()].into_iter().collect();
        // Towing from 2 (hangar1) to G (outside): 3 and 1 adjacent, path 3/C
        let me = ac("me", WorkType::Maintenance, 8, 12).with_current_bay("2");
        let fleet = vec![me.clone()];
        let ctx = ScoringContext::new(&layout, &occ, &fleet, at(6));
        assert!(ctx.signals(&me, &Bay::outer("G")).occupied_dependency);

        // Unassigned: only the candidate's own neighbourhood matters
        let free = ac("free", WorkType::Maintenance, 8, 12);
        assert!(!ctx.signals(&free, &Bay::outer("G")).occupied_dependency);
    }
}
