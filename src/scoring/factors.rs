//! Built-in scoring factors.
//!
//! # Score Convention
//! All factors return higher scores for better fits, on a 0-10 scale.

use super::{FactorScore, ScoringContext, ScoringFactor};
use crate::models::{Aircraft, AircraftSize, Bay, BayKind, Priority, WorkType};

// ======================== Lookup tables ========================

/// Work-type affinity for a bay kind (1-10).
///
/// Every (work type, kind) pair is listed, so the "unlisted pair scores 1"
/// fallback never triggers.
pub fn work_type_affinity(work_type: WorkType, kind: BayKind) -> FactorScore {
    use BayKind::*;
    match (work_type, kind) {
        (WorkType::Paint, Paint) => 10.0,
        (WorkType::Paint, In) => 6.0,
        (WorkType::Paint, Outer) => 2.0,
        (WorkType::Paint, Special) => 1.0,

        (WorkType::Maintenance, In) => 8.0,
        (WorkType::Maintenance, Paint) => 6.0,
        (WorkType::Maintenance, Outer) => 4.0,
        (WorkType::Maintenance, Special) => 2.0,

        (WorkType::Inspection, In) => 10.0,
        (WorkType::Inspection, Paint) => 8.0,
        (WorkType::Inspection, Outer) => 6.0,
        (WorkType::Inspection, Special) => 2.0,

        (WorkType::Storage, Outer) => 10.0,
        (WorkType::Storage, In) => 3.0,
        (WorkType::Storage, Paint) => 2.0,
        (WorkType::Storage, Special) => 1.0,

        (WorkType::Special, Special) => 10.0,
        (WorkType::Special, In) => 4.0,
        (WorkType::Special, Paint) => 3.0,
        (WorkType::Special, Outer) => 1.0,
    }
}

/// Work-type affinity for an outer bay running MTE.
pub fn mte_affinity(work_type: WorkType) -> FactorScore {
    match work_type {
        WorkType::Paint => 3.0,
        WorkType::Maintenance => 10.0,
        WorkType::Inspection => 4.0,
        WorkType::Storage => 2.0,
        WorkType::Special => 2.0,
    }
}

/// Base weight of a priority.
pub fn priority_weight(priority: Priority) -> f64 {
    match priority {
        Priority::Urgent => 10.0,
        Priority::High => 8.0,
        Priority::Normal => 6.0,
        Priority::Low => 4.0,
    }
}

/// How much a bay amplifies priority. MTE bays count as
/// maintenance-capable rather than plain In bays.
pub fn bay_priority_bonus(bay: &Bay) -> f64 {
    if bay.is_mte_active() {
        return 1.2;
    }
    match bay.kind {
        BayKind::Paint => 2.0,
        BayKind::In => 1.5,
        BayKind::Special => 3.0,
        BayKind::Outer => 1.0,
    }
}

// ======================== Factors ========================

/// Work type match.
///
/// Looks up the work-type/bay-kind affinity matrix.
#[derive(Debug, Clone, Copy)]
pub struct WorkTypeMatch;

impl ScoringFactor for WorkTypeMatch {
    fn name(&self) -> &'static str {
        "Work type match"
    }

    fn evaluate(&self, aircraft: &Aircraft, bay: &Bay, _context: &ScoringContext<'_>) -> FactorScore {
        if bay.is_mte_active() {
            mte_affinity(aircraft.work_type)
        } else {
            work_type_affinity(aircraft.work_type, bay.effective_kind())
        }
    }
}

/// Priority handling.
///
/// `priority_weight × bay_priority_bonus`, capped at 10.
#[derive(Debug, Clone, Copy)]
pub struct PriorityHandling;

impl ScoringFactor for PriorityHandling {
    fn name(&self) -> &'static str {
        "Priority handling"
    }

    fn evaluate(&self, aircraft: &Aircraft, bay: &Bay, _context: &ScoringContext<'_>) -> FactorScore {
        (priority_weight(aircraft.priority) * bay_priority_bonus(bay)).min(10.0)
    }
}

/// Efficiency.
///
/// Base 5, adjusted for size fit, cluster proximity, and premium bays
/// spent on storage. Clamped to 1-10.
#[derive(Debug, Clone, Copy)]
pub struct Efficiency;

impl ScoringFactor for Efficiency {
    fn name(&self) -> &'static str {
        "Efficiency"
    }

    fn evaluate(&self, aircraft: &Aircraft, bay: &Bay, context: &ScoringContext<'_>) -> FactorScore {
        let kind = bay.effective_kind();
        let mut score: f64 = 5.0;

        match (aircraft.size, kind) {
            (AircraftSize::Small, BayKind::Special) => score += 3.0,
            (AircraftSize::Large, BayKind::Paint | BayKind::In) => score += 2.0,
            _ => {}
        }

        if context.layout.in_cluster(aircraft.work_type, &bay.id) {
            score += 1.0;
        }

        if aircraft.work_type == WorkType::Storage && matches!(kind, BayKind::Paint | BayKind::Special) {
            score -= 2.0;
        }

        score.clamp(1.0, 10.0)
    }
}

/// Cost efficiency.
///
/// Unassigned aircraft need no tow and score 8. Otherwise the tow cost
/// from the current bay is inverted against twice the reference cost,
/// floored at 1.
#[derive(Debug, Clone, Copy)]
pub struct MovementCost;

impl ScoringFactor for MovementCost {
    fn name(&self) -> &'static str {
        "Cost efficiency"
    }

    fn evaluate(&self, aircraft: &Aircraft, bay: &Bay, context: &ScoringContext<'_>) -> FactorScore {
        let Some(current) = aircraft.current_bay.as_deref() else {
            return 8.0;
        };
        let cost = context.layout.towing_cost(current, &bay.id) as f64;
        let max_cost = context.default_towing_cost as f64 * 2.0;
        (10.0 - (cost / max_cost) * 9.0).max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HangarLayout;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashSet;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    fn ac(size: AircraftSize, work: WorkType) -> Aircraft {
        Aircraft::new("ac", "B-AC", size, work, at(8), at(16))
    }

    fn eval<F: ScoringFactor>(factor: F, aircraft: &Aircraft, bay: &Bay) -> f64 {
        let layout = HangarLayout::standard();
        let occ: HashSet<String> = HashSet::new();
        let fleet = vec![aircraft.clone()];
        let ctx = ScoringContext::new(&layout, &occ, &fleet, at(6));
        factor.evaluate(aircraft, bay, &ctx)
    }

    #[test]
    fn test_work_type_match() {
        let a = ac(AircraftSize::Large, WorkType::Storage);
        assert!((eval(WorkTypeMatch, &a, &Bay::outer("C")) - 10.0).abs() < 1e-10);
        assert!((eval(WorkTypeMatch, &a, &Bay::paint("1")) - 2.0).abs() < 1e-10);

        let m = ac(AircraftSize::Large, WorkType::Maintenance);
        assert!((eval(WorkTypeMatch, &m, &Bay::in_bay("2")) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_work_type_match_mte_column() {
        let m = ac(AircraftSize::Large, WorkType::Maintenance);
        let bay = Bay::outer("A").with_mte_capability().with_mte_active(true);
        assert!((eval(WorkTypeMatch, &m, &bay) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_priority_handling_capped() {
        let urgent = ac(AircraftSize::Large, WorkType::Paint).with_priority(Priority::Urgent);
        assert!((eval(PriorityHandling, &urgent, &Bay::paint("1")) - 10.0).abs() < 1e-10);
        assert!((eval(PriorityHandling, &urgent, &Bay::outer("C")) - 10.0).abs() < 1e-10);

        let low = ac(AircraftSize::Large, WorkType::Paint).with_priority(Priority::Low);
        assert!((eval(PriorityHandling, &low, &Bay::in_bay("2")) - 6.0).abs() < 1e-10);
        assert!((eval(PriorityHandling, &low, &Bay::outer("C")) - 4.0).abs() < 1e-10);

        let normal = ac(AircraftSize::Large, WorkType::Maintenance);
        let mte = Bay::outer("A").with_mte_capability().with_mte_active(true);
        assert!((eval(PriorityHandling, &normal, &mte) - 7.2).abs() < 1e-10);
    }

    #[test]
    fn test_efficiency() {
        // Large in paint bay within paint cluster: 5 + 2 + 1
        let p = ac(AircraftSize::Large, WorkType::Paint);
        assert!((eval(Efficiency, &p, &Bay::paint("1")) - 8.0).abs() < 1e-10);

        // Small special aircraft in the special bay: 5 + 3
        let s = ac(AircraftSize::Small, WorkType::Special);
        assert!((eval(Efficiency, &s, &Bay::special("5")) - 8.0).abs() < 1e-10);

        // Storage in outer cluster bay: 5 + 1
        let st = ac(AircraftSize::Large, WorkType::Storage);
        assert!((eval(Efficiency, &st, &Bay::outer("C")) - 6.0).abs() < 1e-10);
        // Storage wasting a paint bay: 5 + 2 - 2
        assert!((eval(Efficiency, &st, &Bay::paint("1")) - 5.0).abs() < 1e-10);
        // A, B, J are not storage cluster bays
        assert!((eval(Efficiency, &st, &Bay::outer("A")) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_movement_cost() {
        let free = ac(AircraftSize::Large, WorkType::Storage);
        assert!((eval(MovementCost, &free, &Bay::outer("C")) - 8.0).abs() < 1e-10);

        // Same bay tow: 200 / 1000 * 9 = 1.8 → 8.2
        let parked = ac(AircraftSize::Large, WorkType::Storage).with_current_bay("C");
        assert!((eval(MovementCost, &parked, &Bay::outer("C")) - 8.2).abs() < 1e-10);

        // Longer tow costs more and scores lower
        let near = eval(MovementCost, &parked, &Bay::outer("D"));
        let far = eval(MovementCost, &parked, &Bay::outer("R"));
        assert!(far < near);
    }

    #[test]
    fn test_movement_cost_floor() {
        let layout = HangarLayout::standard();
        let occ: HashSet<String> = HashSet::new();
        let parked = ac(AircraftSize::Large, WorkType::Storage).with_current_bay("C");
        let fleet = vec![parked.clone()];
        let ctx = ScoringContext::new(&layout, &occ, &fleet, at(6)).with_default_towing_cost(10);
        assert!((MovementCost.evaluate(&parked, &Bay::outer("R"), &ctx) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_movement_cost_huge_reference() {
        let layout = HangarLayout::standard();
        let occ: HashSet<String> = HashSet::new();
        let parked = ac(AircraftSize::Large, WorkType::Storage).with_current_bay("C");
        let fleet = vec![parked.clone()];
        let ctx = ScoringContext::new(&layout, &occ, &fleet, at(6)).with_default_towing_cost(u64::MAX);
        // Any real tow is negligible against the reference
        let score = MovementCost.evaluate(&parked, &Bay::outer("D"), &ctx);
        assert!((score - 10.0).abs() < 1e-10);
    }
}
