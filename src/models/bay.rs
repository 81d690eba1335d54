//! Bay model.
//!
//! A bay is a physical maintenance slot. Its configured `kind` never
//! changes at runtime; the only runtime reclassification is MTE
//! activation, which makes an Outer bay behave as an In bay. Everything
//! downstream (validation, scoring, statistics) reads
//! [`Bay::effective_kind`] rather than `kind`.
//!
//! Occupancy is stored as a single `Option<AircraftId>`, so
//! `is_occupied() == occupant().is_some()` holds by construction. Only
//! the registry mutates it.

use serde::{Deserialize, Serialize};

use super::AircraftId;

/// Bay identifier (e.g. `"1"`, `"A"`).
pub type BayId = String;

/// Bay classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BayKind {
    /// Paint hall, also usable for in-hangar work.
    Paint,
    /// Covered in-hangar bay.
    In,
    /// Open-air bay.
    Outer,
    /// Restricted bay for small aircraft.
    Special,
}

impl BayKind {
    /// All kinds, in reporting order.
    pub const ALL: [BayKind; 4] = [BayKind::Paint, BayKind::In, BayKind::Outer, BayKind::Special];

    /// Human-readable category label.
    pub fn label(self) -> &'static str {
        match self {
            BayKind::Paint => "Paint Bay",
            BayKind::In => "In Bay",
            BayKind::Outer => "Outer Bay",
            BayKind::Special => "Special Bay",
        }
    }
}

/// A maintenance bay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bay {
    /// Unique bay identifier.
    pub id: BayId,
    /// Configured classification.
    pub kind: BayKind,
    /// Capacity restriction: only small aircraft may use this bay.
    pub small_aircraft_only: bool,
    /// Whether Mobile Tooling Equipment can be deployed here.
    pub mte_capable: bool,
    pub(crate) mte_active: bool,
    pub(crate) occupant: Option<AircraftId>,
}

impl Bay {
    /// Creates an empty bay of the given kind.
    pub fn new(id: impl Into<BayId>, kind: BayKind) -> Self {
        Self {
            id: id.into(),
            kind,
            small_aircraft_only: kind == BayKind::Special,
            mte_capable: false,
            mte_active: false,
            occupant: None,
        }
    }

    /// Creates a paint bay.
    pub fn paint(id: impl Into<BayId>) -> Self {
        Self::new(id, BayKind::Paint)
    }

    /// Creates an in bay.
    pub fn in_bay(id: impl Into<BayId>) -> Self {
        Self::new(id, BayKind::In)
    }

    /// Creates an outer bay.
    pub fn outer(id: impl Into<BayId>) -> Self {
        Self::new(id, BayKind::Outer)
    }

    /// Creates the special (small aircraft only) bay.
    pub fn special(id: impl Into<BayId>) -> Self {
        Self::new(id, BayKind::Special)
    }

    /// Marks this bay as able to host MTE.
    pub fn with_mte_capability(mut self) -> Self {
        self.mte_capable = true;
        self
    }

    /// Seeds the occupant. Intended for snapshot loading; the snapshot
    /// validator checks the back-reference.
    pub fn with_occupant(mut self, aircraft_id: impl Into<AircraftId>) -> Self {
        self.occupant = Some(aircraft_id.into());
        self
    }

    /// Seeds the MTE flag. Intended for snapshot loading.
    pub fn with_mte_active(mut self, active: bool) -> Self {
        self.mte_active = active;
        self
    }

    /// Kind used for compatibility and scoring.
    #[inline]
    pub fn effective_kind(&self) -> BayKind {
        if self.mte_active {
            BayKind::In
        } else {
            self.kind
        }
    }

    /// Whether MTE is currently deployed here.
    #[inline]
    pub fn is_mte_active(&self) -> bool {
        self.mte_active
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Aircraft currently holding the bay.
    #[inline]
    pub fn occupant(&self) -> Option<&str> {
        self.occupant.as_deref()
    }
}
