//! Compatibility rules and snapshot integrity checks.
//!
//! # Compatibility
//!
//! An aircraft may occupy a bay iff:
//! 1. The bay is not restricted to small aircraft (Special kind or the
//!    `small_aircraft_only` flag), or the aircraft is small.
//! 2. The bay's effective kind is allowed for the work type:
//!
//! | Work type | Allowed kinds |
//! |-----------|---------------|
//! | Paint | Paint, In |
//! | Maintenance | In, Paint, Outer |
//! | Inspection | In, Paint, Outer |
//! | Storage | Outer |
//! | Special | Special |
//!
//! # Snapshot integrity
//!
//! [`validate_snapshot`] checks a bay/aircraft collection handed in by a
//! persistence layer before the registry adopts it. It detects:
//! - Duplicate bay or aircraft IDs
//! - Bookings that reference unknown bays
//! - Stays with `arrival >= departure`
//! - Occupants that are unknown or don't point back at the bay
//! - An aircraft occupying more than one bay
//! - Overlapping stays booked on the same bay
//! - MTE flags on incapable bays, or more active units than exist

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::{Aircraft, AircraftSize, Bay, BayKind, WorkType};
use crate::registry::MTE_UNITS;

/// Bay kinds a work type may use.
pub fn allowed_kinds(work_type: WorkType) -> &'static [BayKind] {
    match work_type {
        WorkType::Paint => &[BayKind::Paint, BayKind::In],
        WorkType::Maintenance | WorkType::Inspection => {
            &[BayKind::In, BayKind::Paint, BayKind::Outer]
        }
        WorkType::Storage => &[BayKind::Outer],
        WorkType::Special => &[BayKind::Special],
    }
}

/// Whether `aircraft` may legally occupy `bay`.
pub fn is_compatible(aircraft: &Aircraft, bay: &Bay) -> bool {
    let kind = bay.effective_kind();
    let size_restricted = kind == BayKind::Special || bay.small_aircraft_only;
    if size_restricted && aircraft.size != AircraftSize::Small {
        return false;
    }
    allowed_kinds(aircraft.work_type).contains(&kind)
}

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of snapshot validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An aircraft is booked on a bay that doesn't exist.
    UnknownBayReference,
    /// A bay's occupant doesn't exist.
    UnknownOccupant,
    /// Occupant and booking disagree.
    OccupancyMismatch,
    /// Arrival is not before departure.
    InvalidStay,
    /// Two stays on one bay overlap.
    DoubleBooking,
    /// MTE flag set where it can't be.
    InvalidMte,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a bay/aircraft snapshot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(bays: &[Bay], aircraft: &[Aircraft]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut bay_ids = HashSet::new();
    for bay in bays {
        if !bay_ids.insert(bay.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate bay ID: {}", bay.id),
            ));
        }
    }

    let mut by_id: HashMap<&str, &Aircraft> = HashMap::new();
    for ac in aircraft {
        if by_id.insert(ac.id.as_str(), ac).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate aircraft ID: {}", ac.id),
            ));
        }
        if !ac.has_valid_stay() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidStay,
                format!("Aircraft '{}' departs before it arrives", ac.registration),
            ));
        }
        if let Some(bay_id) = &ac.current_bay {
            if !bay_ids.contains(bay_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownBayReference,
                    format!("Aircraft '{}' references unknown bay '{bay_id}'", ac.id),
                ));
            }
        }
    }

    // Occupant back-references
    let mut occupied_by: HashMap<&str, &str> = HashMap::new();
    for bay in bays {
        let Some(occupant) = bay.occupant() else {
            continue;
        };
        match by_id.get(occupant) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownOccupant,
                format!("Bay '{}' is held by unknown aircraft '{occupant}'", bay.id),
            )),
            Some(ac) if ac.current_bay.as_deref() != Some(bay.id.as_str()) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OccupancyMismatch,
                    format!(
                        "Bay '{}' is held by '{occupant}', whose booking is {:?}",
                        bay.id, ac.current_bay
                    ),
                ))
            }
            Some(_) => {}
        }
        if let Some(other) = occupied_by.insert(occupant, bay.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OccupancyMismatch,
                format!("Aircraft '{occupant}' occupies both bay '{other}' and bay '{}'", bay.id),
            ));
        }
    }

    if let Some(err) = detect_double_booking(aircraft) {
        errors.push(err);
    }

    let mut active_mte = 0;
    for bay in bays.iter().filter(|b| b.is_mte_active()) {
        active_mte += 1;
        if !bay.mte_capable {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMte,
                format!("Bay '{}' has MTE active but is not MTE capable", bay.id),
            ));
        }
    }
    if active_mte > MTE_UNITS {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidMte,
            format!("{active_mte} MTE units active, only {MTE_UNITS} exist"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Finds the first bay with overlapping stays.
///
/// Stays per bay are sorted by arrival; with half-open intervals, a stay
/// overlaps an earlier one iff it arrives before the latest departure seen.
fn detect_double_booking(aircraft: &[Aircraft]) -> Option<ValidationError> {
    let mut per_bay: HashMap<&str, Vec<&Aircraft>> = HashMap::new();
    for ac in aircraft {
        if let Some(bay_id) = &ac.current_bay {
            per_bay.entry(bay_id.as_str()).or_default().push(ac);
        }
    }

    let mut bay_ids: Vec<&str> = per_bay.keys().copied().collect();
    bay_ids.sort_unstable();

    for bay_id in bay_ids {
        let stays = per_bay.get_mut(bay_id)?;
        stays.sort_by_key(|a| a.arrival_time);
        let mut latest: Option<&Aircraft> = None;
        for &ac in stays.iter() {
            if let Some(prev) = latest {
                if ac.arrival_time < prev.departure_time {
                    return Some(ValidationError::new(
                        ValidationErrorKind::DoubleBooking,
                        format!(
                            "Bay '{bay_id}' double-booked by '{}' and '{}'",
                            prev.id, ac.id
                        ),
                    ));
                }
            }
            match latest {
                Some(p) if p.departure_time >= ac.departure_time => {}
                _ => latest = Some(ac),
            }
        }
    }

    None
}
