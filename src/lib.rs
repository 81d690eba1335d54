//! Bay assignment engine for a multi-hangar aircraft maintenance facility.
//!
//! Places aircraft into maintenance bays while keeping towing cost and
//! movement conflicts low and honouring work-type, size and capacity rules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Bay`, `Aircraft`, `Movement`, `Recommendation`
//! - **`layout`**: Facility geometry, towing time/cost estimates, zones and paths
//! - **`dependency`**: Occupied bays blocking a tow
//! - **`validation`**: Aircraft/bay compatibility and snapshot integrity checks
//! - **`registry`**: Owned bay/aircraft state with atomic assign/vacate
//! - **`scoring`**: Weighted multi-criteria bay scoring with intelligence levels
//! - **`optimizer`**: Greedy ranked recommendations, planning helpers, facility stats
//! - **`config`**: Engine settings (TOML-loadable)
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use hangar_bay::config::EngineConfig;
//! use hangar_bay::models::{AircraftSize, NewAircraft, Priority, WorkType};
//! use hangar_bay::optimizer::{apply_recommendations, plan_unassigned};
//! use hangar_bay::registry::Registry;
//!
//! let mut registry = Registry::standard();
//! let id = registry.add_aircraft(NewAircraft {
//!     registration: "B-HNA".into(),
//!     aircraft_type: "B777".into(),
//!     size: AircraftSize::Large,
//!     work_type: WorkType::Paint,
//!     priority: Priority::High,
//!     arrival_time: Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
//!     departure_time: Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap(),
//! })?;
//!
//! let now = Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap();
//! let recs = plan_unassigned(&registry, &EngineConfig::default(), now);
//! let report = apply_recommendations(&mut registry, &recs);
//!
//! assert!(report.is_complete());
//! assert!(registry.aircraft(&id).unwrap().is_assigned());
//! # Ok::<(), hangar_bay::error::AssignmentError>(())
//! ```

pub mod config;
pub mod dependency;
pub mod error;
pub mod layout;
pub mod models;
pub mod optimizer;
pub mod registry;
pub mod scoring;
pub mod validation;
