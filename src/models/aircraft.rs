//! Aircraft model.
//!
//! An aircraft is created unassigned, becomes `Assigned` when the registry
//! places it in a bay, and returns to `Available` when vacated.
//!
//! # Time Representation
//! Stays are `[arrival_time, departure_time)` intervals in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BayId;

/// Aircraft identifier.
pub type AircraftId = String;

/// Airframe size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftSize {
    Small,
    Large,
}

/// Work the aircraft is in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Paint,
    Maintenance,
    Inspection,
    Storage,
    Special,
}

/// Handling priority.
///
/// Ordered from most to least urgent, so sorting ascending puts
/// `Urgent` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

/// Lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftStatus {
    /// Created, never placed.
    Scheduled,
    /// Holding a bay.
    Assigned,
    /// Vacated from a bay.
    Available,
}

/// An aircraft visiting the facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Unique identifier.
    pub id: AircraftId,
    /// Registration mark shown to users (e.g. "B-HNA").
    pub registration: String,
    /// Airframe type (e.g. "B777"). Informational only.
    pub aircraft_type: String,
    pub size: AircraftSize,
    pub work_type: WorkType,
    pub priority: Priority,
    /// Arrival instant (inclusive).
    pub arrival_time: DateTime<Utc>,
    /// Departure instant (exclusive).
    pub departure_time: DateTime<Utc>,
    /// Bay booked for this stay, if any.
    pub current_bay: Option<BayId>,
    pub status: AircraftStatus,
}

/// Fields supplied when registering a new aircraft; the registry
/// generates the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAircraft {
    pub registration: String,
    #[serde(default)]
    pub aircraft_type: String,
    pub size: AircraftSize,
    pub work_type: WorkType,
    pub priority: Priority,
    pub arrival_time: DateTime<Utc>,
    pub departure_time: DateTime<Utc>,
}

impl Aircraft {
    /// Creates an unassigned aircraft with `Normal` priority.
    pub fn new(
        id: impl Into<AircraftId>,
        registration: impl Into<String>,
        size: AircraftSize,
        work_type: WorkType,
        arrival_time: DateTime<Utc>,
        departure_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            registration: registration.into(),
            aircraft_type: String::new(),
            size,
            work_type,
            priority: Priority::Normal,
            arrival_time,
            departure_time,
            current_bay: None,
            status: AircraftStatus::Scheduled,
        }
    }

    /// Builds an aircraft from a registration request.
    pub fn from_request(id: impl Into<AircraftId>, request: NewAircraft) -> Self {
        Self {
            id: id.into(),
            registration: request.registration,
            aircraft_type: request.aircraft_type,
            size: request.size,
            work_type: request.work_type,
            priority: request.priority,
            arrival_time: request.arrival_time,
            departure_time: request.departure_time,
            current_bay: None,
            status: AircraftStatus::Scheduled,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the airframe type.
    pub fn with_type(mut self, aircraft_type: impl Into<String>) -> Self {
        self.aircraft_type = aircraft_type.into();
        self
    }

    /// Seeds a bay booking. Intended for snapshots and what-if scoring;
    /// live assignment goes through the registry.
    pub fn with_current_bay(mut self, bay_id: impl Into<BayId>) -> Self {
        self.current_bay = Some(bay_id.into());
        self.status = AircraftStatus::Assigned;
        self
    }

    /// Whether the stay interval is well-formed.
    #[inline]
    pub fn has_valid_stay(&self) -> bool {
        self.arrival_time < self.departure_time
    }

    /// Whether the stay covers `instant` (both ends inclusive).
    #[inline]
    pub fn is_present_at(&self, instant: DateTime<Utc>) -> bool {
        self.arrival_time <= instant && instant <= self.departure_time
    }

    /// Whether two half-open stays overlap.
    #[inline]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.departure_time && end > self.arrival_time
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.current_bay.is_some()
    }
}
