//! Registry-level planning operations.
//!
//! Thin wrappers that pick the aircraft and bays out of a [`Registry`],
//! run the [`AssignmentOptimizer`] and optionally apply its output.

use chrono::{DateTime, Utc};
use std::slice;

use super::greedy::{rank, AssignmentOptimizer};
use crate::config::EngineConfig;
use crate::error::AssignmentError;
use crate::models::{Aircraft, AircraftStatus, Recommendation};
use crate::registry::Registry;

/// Outcome of [`apply_recommendations`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Recommendations that were assigned.
    pub applied: Vec<Recommendation>,
    /// Recommendations the registry rejected, with the reason.
    pub failed: Vec<(Recommendation, AssignmentError)>,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Recommends bays for every unassigned aircraft.
///
/// Aircraft are processed by priority (urgent first; registration order
/// within a priority) against the unoccupied bays. This departs from
/// plain registration order on purpose: the greedy pass lets earlier
/// aircraft claim contested bays, so an urgent aircraft registered late
/// would otherwise lose the best bay to a normal one. Callers that need
/// registration order pass [`Registry::unassigned_aircraft`] straight to
/// [`optimize`](super::optimize).
pub fn plan_unassigned(
    registry: &Registry,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let mut queue: Vec<Aircraft> = registry
        .unassigned_aircraft()
        .into_iter()
        .cloned()
        .collect();
    queue.sort_by_key(|a| a.priority);

    AssignmentOptimizer::new(config.clone()).optimize(
        registry,
        &queue,
        &registry.available_bay_ids(),
        now,
    )
}

/// Best unoccupied bay for a single aircraft.
pub fn recommend_for(
    registry: &Registry,
    aircraft_id: &str,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Result<Option<Recommendation>, AssignmentError> {
    let aircraft = registry
        .aircraft(aircraft_id)
        .ok_or_else(|| AssignmentError::UnknownAircraft(aircraft_id.to_string()))?;

    let mut recs = AssignmentOptimizer::new(config.clone()).optimize(
        registry,
        slice::from_ref(aircraft),
        &registry.available_bay_ids(),
        now,
    );
    Ok(recs.pop())
}

/// Recommends a bay and assigns it.
///
/// Returns `Ok(None)` when no compatible bay is free.
pub fn auto_assign(
    registry: &mut Registry,
    aircraft_id: &str,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Result<Option<Recommendation>, AssignmentError> {
    let Some(rec) = recommend_for(registry, aircraft_id, config, now)? else {
        return Ok(None);
    };
    registry.assign(&rec.aircraft_id, &rec.bay_id)?;
    Ok(Some(rec))
}

/// Assigns recommendations in rank order, collecting failures.
pub fn apply_recommendations(registry: &mut Registry, recommendations: &[Recommendation]) -> ApplyReport {
    let mut ordered = recommendations.to_vec();
    ordered.sort_by_key(|r| r.rank);

    let mut report = ApplyReport::default();
    for rec in ordered {
        match registry.assign(&rec.aircraft_id, &rec.bay_id) {
            Ok(()) => report.applied.push(rec),
            Err(e) => {
                tracing::warn!(aircraft = %rec.registration, bay = %rec.bay_id, error = %e, "recommendation rejected");
                report.failed.push((rec, e));
            }
        }
    }

    tracing::info!(
        applied = report.applied.len(),
        failed = report.failed.len(),
        "recommendations applied"
    );
    report
}

/// Independent best-bay predictions for every scheduled aircraft.
///
/// Unlike [`plan_unassigned`], each aircraft sees the full set of free
/// bays, so two suggestions may name the same bay.
pub fn suggest_schedule(
    registry: &Registry,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let optimizer = AssignmentOptimizer::new(config.clone());
    let bays = registry.available_bay_ids();

    let mut suggestions: Vec<Recommendation> = registry
        .fleet()
        .iter()
        .filter(|a| a.status == AircraftStatus::Scheduled)
        .filter_map(|a| {
            optimizer
                .optimize(registry, slice::from_ref(a), &bays, now)
                .pop()
        })
        .collect();
    rank(&mut suggestions);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftSize, Priority, WorkType};
    use crate::scoring::IntelligenceLevel;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    fn ac(id: &str, size: AircraftSize, work: WorkType) -> Aircraft {
        Aircraft::new(id, format!("B-{}", id.to_uppercase()), size, work, at(8), at(20))
    }

    fn config() -> EngineConfig {
        EngineConfig::default().with_intelligence_level(IntelligenceLevel::Basic)
    }

    /// Facility reduced to bays 2 and C being free.
    fn two_bay_registry(fleet: Vec<Aircraft>) -> Registry {
        let mut r = Registry::standard();
        for a in fleet {
            r.insert_aircraft(a).unwrap();
        }
        let mut fillers = 0;
        let ids: Vec<String> = r.bays().iter().map(|b| b.id.clone()).collect();
        for bay in ids.iter().filter(|id| !matches!(id.as_str(), "2" | "C")) {
            let filler = if bay == "5" {
                ac(&format!("f{fillers}"), AircraftSize::Small, WorkType::Special)
            } else if matches!(bay.as_str(), "1" | "3" | "4" | "6" | "7" | "8") {
                ac(&format!("f{fillers}"), AircraftSize::Large, WorkType::Maintenance)
            } else {
                ac(&format!("f{fillers}"), AircraftSize::Large, WorkType::Storage)
            };
            let id = filler.id.clone();
            r.insert_aircraft(filler).unwrap();
            r.assign(&id, bay).unwrap();
            fillers += 1;
        }
        r
    }

    #[test]
    fn test_plan_unassigned_orders_by_priority() {
        // Normal registered first; urgent still gets the In bay
        let r = two_bay_registry(vec![
            ac("n", AircraftSize::Large, WorkType::Maintenance),
            ac("u", AircraftSize::Large, WorkType::Maintenance).with_priority(Priority::Urgent),
        ]);
        assert_eq!(r.available_bay_ids(), vec!["2".to_string(), "C".to_string()]);

        let recs = plan_unassigned(&r, &config(), at(9));
        assert_eq!(recs.len(), 2);
        let urgent = recs.iter().find(|rec| rec.aircraft_id == "u").unwrap();
        assert_eq!(urgent.bay_id, "2");
        assert_eq!(urgent.rank, 1);

        // Registration order through the plain pass lets the normal one claim it
        let in_order: Vec<Aircraft> = r.unassigned_aircraft().into_iter().cloned().collect();
        let recs = crate::optimizer::optimize(&r, &in_order, &r.available_bay_ids(), &config(), at(9));
        let normal = recs.iter().find(|rec| rec.aircraft_id == "n").unwrap();
        assert_eq!(normal.bay_id, "2");
    }

    #[test]
    fn test_recommend_for() {
        let r = two_bay_registry(vec![ac("s", AircraftSize::Large, WorkType::Storage)]);
        let rec = recommend_for(&r, "s", &config(), at(9)).unwrap().unwrap();
        assert_eq!(rec.bay_id, "C");

        assert_eq!(
            recommend_for(&r, "zz", &config(), at(9)),
            Err(AssignmentError::UnknownAircraft("zz".into()))
        );
    }

    #[test]
    fn test_auto_assign() {
        let mut r = two_bay_registry(vec![
            ac("s", AircraftSize::Large, WorkType::Storage),
            ac("t", AircraftSize::Large, WorkType::Storage),
        ]);
        let rec = auto_assign(&mut r, "s", &config(), at(9)).unwrap().unwrap();
        assert_eq!(rec.bay_id, "C");
        assert_eq!(r.bay("C").unwrap().occupant(), Some("s"));

        // C is taken and 2 doesn't take storage
        assert_eq!(auto_assign(&mut r, "t", &config(), at(9)), Ok(None));
        assert!(r.aircraft("t").unwrap().current_bay.is_none());
    }

    #[test]
    fn test_apply_recommendations() {
        let mut r = two_bay_registry(vec![
            ac("n", AircraftSize::Large, WorkType::Maintenance),
            ac("u", AircraftSize::Large, WorkType::Maintenance).with_priority(Priority::Urgent),
        ]);
        let recs = plan_unassigned(&r, &config(), at(9));
        let report = apply_recommendations(&mut r, &recs);

        assert!(report.is_complete());
        assert_eq!(report.applied.len(), 2);
        assert_eq!(r.bay("2").unwrap().occupant(), Some("u"));
        assert_eq!(r.bay("C").unwrap().occupant(), Some("n"));
        assert!(r.available_bay_ids().is_empty());
    }

    #[test]
    fn test_apply_collects_failures() {
        let mut r = two_bay_registry(vec![ac("s", AircraftSize::Large, WorkType::Storage)]);
        let bad = Recommendation::new("s", "B-S", "2", 9.0, 90.0, vec![]);
        let missing = Recommendation::new("zz", "B-ZZ", "C", 8.0, 80.0, vec![]);

        let report = apply_recommendations(&mut r, &[bad, missing]);
        assert!(report.applied.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert!(matches!(report.failed[0].1, AssignmentError::IncompatibleAssignment { .. }));
        assert!(matches!(report.failed[1].1, AssignmentError::UnknownAircraft(_)));
    }

    #[test]
    fn test_suggest_schedule_is_independent() {
        let r = two_bay_registry(vec![
            ac("a", AircraftSize::Large, WorkType::Storage),
            ac("b", AircraftSize::Large, WorkType::Storage),
        ]);
        let recs = suggest_schedule(&r, &config(), at(9));
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|rec| rec.bay_id == "C"));
        assert_eq!(recs.iter().map(|rec| rec.rank).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_suggest_skips_assigned() {
        let mut r = Registry::standard();
        r.insert_aircraft(ac("a", AircraftSize::Large, WorkType::Paint)).unwrap();
        r.insert_aircraft(ac("b", AircraftSize::Large, WorkType::Paint)).unwrap();
        r.assign("a", "1").unwrap();

        let recs = suggest_schedule(&r, &config(), at(9));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].aircraft_id, "b");
        assert_ne!(recs[0].bay_id, "1");
    }
}
