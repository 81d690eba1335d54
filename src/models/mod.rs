//! Hangar domain models.
//!
//! Provides the data types the engine reads and produces: bays, aircraft,
//! derived movements and ranked recommendations.
//!
//! # Domain Mappings
//!
//! | hangar-bay | Scheduling term | Notes |
//! |------------|-----------------|-------|
//! | Bay | Resource | Classified by `BayKind`, one occupant at a time |
//! | Aircraft | Task | Stay interval, work type, priority |
//! | Movement | Transition | Derived tow, never stored |
//! | Recommendation | Assignment | Ranked optimizer output |

mod aircraft;
mod bay;
mod movement;
mod recommendation;

pub use aircraft::{Aircraft, AircraftId, AircraftSize, AircraftStatus, NewAircraft, Priority, WorkType};
pub use bay::{Bay, BayId, BayKind};
pub use movement::Movement;
pub use recommendation::{ConfidenceBand, Recommendation, MAX_CONFIDENCE, MIN_CONFIDENCE};
