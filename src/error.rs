//! Error types.

use thiserror::Error;

use crate::models::{AircraftId, BayId};
use crate::validation::ValidationError;

/// Failures of registry mutations (`assign`, `vacate`, fleet and MTE
/// operations). A failed call leaves the registry untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("aircraft {aircraft} cannot be assigned to bay {bay}")]
    IncompatibleAssignment { aircraft: AircraftId, bay: BayId },

    #[error("bay {bay} is not available for the requested period (held by {conflicting})")]
    TimeConflict { bay: BayId, conflicting: AircraftId },

    #[error("unknown bay: {0}")]
    UnknownBay(BayId),

    #[error("unknown aircraft: {0}")]
    UnknownAircraft(AircraftId),

    #[error("aircraft id already registered: {0}")]
    DuplicateAircraft(AircraftId),

    #[error("aircraft {0} must arrive before it departs")]
    InvalidTimeWindow(String),

    #[error("bay {0} cannot host MTE")]
    MteNotSupported(BayId),

    #[error("all {0} MTE units are in use")]
    MteUnavailable(usize),
}

/// Failures loading or checking [`EngineConfig`](crate::config::EngineConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// A snapshot rejected by [`validate_snapshot`](crate::validation::validate_snapshot).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid snapshot: {} problem(s), first: {}", .0.len(), first_message(.0))]
pub struct SnapshotError(pub Vec<ValidationError>);

fn first_message(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_default()
}
