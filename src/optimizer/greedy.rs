//! Greedy bay assignment.
//!
//! # Algorithm
//!
//! 1. Resolve the available bay ids into a candidate pool (unknown ids are
//!    logged and dropped).
//! 2. For each aircraft, in input order, score every compatible bay still
//!    in the pool and keep the highest total. Ties keep the earlier bay.
//! 3. Remove the chosen bay from the pool, so later aircraft in the same
//!    pass never see it.
//! 4. Sort the recommendations by score, descending and stable, and number
//!    them from 1.
//!
//! # Complexity
//! O(a * b) scorer calls, where a=aircraft and b=available bays.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::models::{Aircraft, Bay, BayId, Recommendation};
use crate::registry::Registry;
use crate::scoring::{BayScore, BayScorer, IntelligenceLevel};
use crate::validation::is_compatible;

/// Greedy, score-driven bay assignment.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hangar_bay::models::{Aircraft, AircraftSize, WorkType};
/// use hangar_bay::optimizer::AssignmentOptimizer;
/// use hangar_bay::registry::Registry;
///
/// let registry = Registry::standard();
/// let now = Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap();
/// let storage = Aircraft::new(
///     "ac-1", "B-KPA", AircraftSize::Large, WorkType::Storage,
///     Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 3, 12, 8, 0, 0).unwrap(),
/// );
///
/// let recs = AssignmentOptimizer::default().optimize(
///     &registry, &[storage], &["1".into(), "C".into()], now,
/// );
/// assert_eq!(recs.len(), 1);
/// assert_eq!(recs[0].bay_id, "C");
/// assert_eq!(recs[0].rank, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssignmentOptimizer {
    scorer: BayScorer,
    config: EngineConfig,
}

impl AssignmentOptimizer {
    /// Creates an optimizer with the standard scorer.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scorer: BayScorer::standard(),
            config,
        }
    }

    /// Replaces the scorer.
    pub fn with_scorer(mut self, scorer: BayScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Sets the intelligence level.
    pub fn with_level(mut self, level: IntelligenceLevel) -> Self {
        self.config.intelligence_level = level;
        self
    }

    pub fn level(&self) -> IntelligenceLevel {
        self.config.intelligence_level
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produces ranked recommendations for `aircraft` over `available_bays`.
    ///
    /// Bays are looked up in `registry`, which also supplies occupancy and
    /// the fleet for the scoring context. An aircraft with no compatible
    /// bay left is simply absent from the result.
    pub fn optimize(
        &self,
        registry: &Registry,
        aircraft: &[Aircraft],
        available_bays: &[BayId],
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let mut pool = resolve_pool(registry, available_bays);
        if aircraft.is_empty() || pool.is_empty() {
            return Vec::new();
        }

        let context = registry.scoring_context(now, &self.config);
        let level = self.config.intelligence_level;
        let mut recommendations = Vec::with_capacity(aircraft.len().min(pool.len()));

        for ac in aircraft {
            let mut best: Option<(usize, BayScore)> = None;

            for (i, bay) in pool.iter().enumerate() {
                if !is_compatible(ac, bay) {
                    continue;
                }
                let score = self.scorer.score(ac, bay, &context, level);
                let better = match &best {
                    Some((_, current)) => score.total > current.total,
                    None => true,
                };
                if better {
                    best = Some((i, score));
                }
            }

            let Some((i, score)) = best else {
                tracing::debug!(aircraft = %ac.registration, "no compatible bay left");
                continue;
            };

            let bay = pool.remove(i);
            tracing::debug!(
                aircraft = %ac.registration,
                bay = %bay.id,
                score = score.total,
                "bay selected"
            );
            recommendations.push(Recommendation::new(
                ac.id.clone(),
                ac.registration.clone(),
                bay.id.clone(),
                score.total,
                score.confidence,
                score.reasoning,
            ));

            if pool.is_empty() {
                break;
            }
        }

        rank(&mut recommendations);
        tracing::info!(
            aircraft = aircraft.len(),
            recommended = recommendations.len(),
            level = u8::from(level),
            "optimization pass complete"
        );
        recommendations
    }
}

/// Sorts by score, descending and stable, and numbers from 1.
pub(crate) fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    for (i, rec) in recommendations.iter_mut().enumerate() {
        rec.rank = i + 1;
    }
}

fn resolve_pool<'r>(registry: &'r Registry, available_bays: &[BayId]) -> Vec<&'r Bay> {
    let mut seen = HashSet::new();
    let mut pool = Vec::with_capacity(available_bays.len());
    for id in available_bays {
        match registry.bay(id) {
            Some(bay) => {
                if seen.insert(id.as_str()) {
                    pool.push(bay);
                }
            }
            None => tracing::warn!(bay = %id, "unknown bay id skipped"),
        }
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftSize, Priority, WorkType};
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    fn ac(id: &str, size: AircraftSize, work: WorkType) -> Aircraft {
        Aircraft::new(id, format!("B-{}", id.to_uppercase()), size, work, at(8), at(20))
    }

    fn ids(ids: &[&str]) -> Vec<BayId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_storage_goes_outer() {
        let r = Registry::standard();
        let recs = AssignmentOptimizer::default().optimize(
            &r,
            &[ac("s", AircraftSize::Large, WorkType::Storage)],
            &ids(&["1", "C"]),
            at(9),
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].bay_id, "C");
        assert_eq!(recs[0].rank, 1);
    }

    #[test]
    fn test_urgent_takes_in_bay() {
        let r = Registry::standard();
        let urgent = ac("u", AircraftSize::Large, WorkType::Maintenance).with_priority(Priority::Urgent);
        let normal = ac("n", AircraftSize::Large, WorkType::Maintenance);

        let recs = AssignmentOptimizer::new(EngineConfig::default().with_intelligence_level(IntelligenceLevel::Basic))
            .optimize(&r, &[urgent, normal], &ids(&["2", "C"]), at(9));

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].aircraft_id, "u");
        assert_eq!(recs[0].bay_id, "2");
        assert_eq!(recs[1].aircraft_id, "n");
        assert_eq!(recs[1].bay_id, "C");
        assert!(recs[0].score > recs[1].score);
        assert_eq!((recs[0].rank, recs[1].rank), (1, 2));
    }

    #[test]
    fn test_input_order_decides_competition() {
        let r = Registry::standard();
        let urgent = ac("u", AircraftSize::Large, WorkType::Maintenance).with_priority(Priority::Urgent);
        let normal = ac("n", AircraftSize::Large, WorkType::Maintenance);

        // Whoever comes first claims bay 2
        let recs = AssignmentOptimizer::default().optimize(&r, &[normal, urgent], &ids(&["2", "C"]), at(9));
        let normal_rec = recs.iter().find(|rec| rec.aircraft_id == "n").unwrap();
        assert_eq!(normal_rec.bay_id, "2");
    }

    #[test]
    fn test_empty_inputs() {
        let r = Registry::standard();
        let fleet = vec![
            ac("a", AircraftSize::Large, WorkType::Paint),
            ac("b", AircraftSize::Small, WorkType::Special),
        ];
        let opt = AssignmentOptimizer::default();
        assert!(opt.optimize(&r, &fleet, &[], at(9)).is_empty());
        assert!(opt.optimize(&r, &[], &ids(&["1", "2"]), at(9)).is_empty());
    }

    #[test]
    fn test_no_compatible_bay() {
        let r = Registry::standard();
        let recs = AssignmentOptimizer::default().optimize(
            &r,
            &[ac("big", AircraftSize::Large, WorkType::Special)],
            &ids(&["5", "C"]),
            at(9),
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_bay_used_once_per_pass() {
        let r = Registry::standard();
        let fleet = vec![
            ac("a", AircraftSize::Large, WorkType::Storage),
            ac("b", AircraftSize::Large, WorkType::Storage),
            ac("c", AircraftSize::Large, WorkType::Storage),
        ];
        let recs = AssignmentOptimizer::default().optimize(&r, &fleet, &ids(&["C", "D"]), at(9));
        assert_eq!(recs.len(), 2);
        assert_ne!(recs[0].bay_id, recs[1].bay_id);
        assert!(recs.iter().all(|rec| rec.aircraft_id != "c"));
    }

    #[test]
    fn test_tie_keeps_first_bay() {
        let r = Registry::standard();
        // D and E are identical outer bays for storage
        let recs = AssignmentOptimizer::default().optimize(
            &r,
            &[ac("s", AircraftSize::Large, WorkType::Storage)],
            &ids(&["E", "D"]),
            at(9),
        );
        assert_eq!(recs[0].bay_id, "E");
    }

    #[test]
    fn test_unknown_and_duplicate_bays_ignored() {
        let r = Registry::standard();
        let fleet = vec![
            ac("a", AircraftSize::Large, WorkType::Storage),
            ac("b", AircraftSize::Large, WorkType::Storage),
        ];
        let recs = AssignmentOptimizer::default().optimize(&r, &fleet, &ids(&["ZZ", "C", "C"]), at(9));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].bay_id, "C");
    }

    #[test]
    fn test_deterministic() {
        let r = Registry::standard();
        let fleet = vec![
            ac("a", AircraftSize::Large, WorkType::Paint),
            ac("b", AircraftSize::Large, WorkType::Maintenance).with_priority(Priority::High),
            ac("c", AircraftSize::Small, WorkType::Special),
            ac("d", AircraftSize::Large, WorkType::Inspection).with_priority(Priority::Low),
            ac("e", AircraftSize::Large, WorkType::Storage),
        ];
        let bays = r.available_bay_ids();
        for level in 1..=5u8 {
            let opt = AssignmentOptimizer::default().with_level(IntelligenceLevel::try_from(level).unwrap());
            let first = opt.optimize(&r, &fleet, &bays, at(9));
            let second = opt.optimize(&r, &fleet, &bays, at(9));
            assert_eq!(first, second);
            assert_eq!(first.len(), 5);
            assert!(first.windows(2).all(|w| w[0].score >= w[1].score));
            assert!(first.iter().all(|rec| (60.0..=95.0).contains(&rec.confidence)));
        }
    }

    #[test]
    fn test_recommendation_text() {
        let r = Registry::standard();
        let recs = AssignmentOptimizer::default().with_level(IntelligenceLevel::Basic).optimize(
            &r,
            &[ac("p", AircraftSize::Large, WorkType::Paint)],
            &ids(&["1"]),
            at(9),
        );
        // 9.4 → confidence 94
        assert_eq!(recs[0].recommendation, "Assign B-P to Bay 1 (Highly Recommended)");
        assert_eq!(recs[0].reasoning.len(), 4);
    }
}
