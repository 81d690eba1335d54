//! Bay assignment optimization and facility metrics.
//!
//! # Algorithm
//!
//! `AssignmentOptimizer` is a single greedy pass: each aircraft, in input
//! order, takes its best-scoring compatible bay from a shrinking pool. It
//! is not optimal, but it is fast, deterministic and easy to explain to a
//! planner reading the reasoning lines.
//!
//! # Planning
//!
//! [`plan_unassigned`], [`recommend_for`], [`auto_assign`],
//! [`apply_recommendations`] and [`suggest_schedule`] run the optimizer
//! against a [`Registry`](crate::registry::Registry).
//!
//! # Metrics
//!
//! `FacilityStats` reports bay occupancy overall and per bay kind.

mod greedy;
mod planner;
mod stats;

pub use greedy::AssignmentOptimizer;
pub use planner::{
    apply_recommendations, auto_assign, plan_unassigned, recommend_for, suggest_schedule, ApplyReport,
};
pub use stats::{FacilityStats, KindUtilization};

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::models::{Aircraft, BayId, Recommendation};
use crate::registry::Registry;

/// Runs one greedy pass with the standard scorer.
///
/// `config` supplies the intelligence level and the towing cost reference.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hangar_bay::config::EngineConfig;
/// use hangar_bay::models::{Aircraft, AircraftSize, WorkType};
/// use hangar_bay::optimizer::optimize;
/// use hangar_bay::registry::Registry;
///
/// let registry = Registry::standard();
/// let now = Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap();
/// let paint = Aircraft::new(
///     "ac-1", "B-HNA", AircraftSize::Large, WorkType::Paint,
///     Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 3, 11, 8, 0, 0).unwrap(),
/// );
///
/// let recs = optimize(&registry, &[paint], &registry.available_bay_ids(), &EngineConfig::default(), now);
/// assert_eq!(recs[0].bay_id, "1");
/// ```
pub fn optimize(
    registry: &Registry,
    aircraft: &[Aircraft],
    available_bays: &[BayId],
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    AssignmentOptimizer::new(config.clone()).optimize(registry, aircraft, available_bays, now)
}
