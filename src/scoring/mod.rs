//! Multi-criteria bay scoring.
//!
//! Scores one (aircraft, bay) pair as a weighted sum of factor scores,
//! then scales the sum by an intelligence-level multiplier.
//!
//! | Factor | Weight | Range |
//! |--------|--------|-------|
//! | Work type match | 0.4 | 1-10 |
//! | Priority handling | 0.3 | 4-10 |
//! | Efficiency | 0.2 | 1-10 |
//! | Cost efficiency | 0.1 | 1-10 |
//!
//! # Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use hangar_bay::models::{Aircraft, AircraftSize, Bay, WorkType};
//! use hangar_bay::scoring::{BayScorer, IntelligenceLevel, ScoringContext};
//! use hangar_bay::layout::HangarLayout;
//! use std::collections::HashSet;
//!
//! let now = Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap();
//! let aircraft = Aircraft::new(
//!     "ac-1", "B-HNA", AircraftSize::Large, WorkType::Paint,
//!     Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 3, 11, 8, 0, 0).unwrap(),
//! );
//! let layout = HangarLayout::standard();
//! let occupied: HashSet<String> = HashSet::new();
//! let fleet = vec![aircraft.clone()];
//! let ctx = ScoringContext::new(&layout, &occupied, &fleet, now);
//!
//! let score = BayScorer::standard().score(&aircraft, &Bay::paint("1"), &ctx, IntelligenceLevel::Basic);
//! assert!(score.total > 8.0);
//! assert_eq!(score.reasoning.len(), 4);
//! ```

mod context;
mod engine;
pub mod factors;
mod intelligence;

pub use context::ScoringContext;
pub use engine::{BayScore, BayScorer};
pub use intelligence::{IntelligenceLevel, InvalidLevel, ModifierSignals};

use crate::models::{Aircraft, Bay};
use std::fmt::Debug;

/// Score of a single factor, on a 0-10 scale.
///
/// **Higher score = better fit.**
pub type FactorScore = f64;

/// One criterion of the bay score.
pub trait ScoringFactor: Send + Sync + Debug {
    /// Label used in reasoning lines (e.g. "Work type match").
    fn name(&self) -> &'static str;

    /// Evaluates how well `bay` suits `aircraft`.
    fn evaluate(&self, aircraft: &Aircraft, bay: &Bay, context: &ScoringContext<'_>) -> FactorScore;
}
