//! Movement dependency resolution.
//!
//! Before an aircraft can be towed out of `from_bay`, the bays around it
//! and the bays on the tow path to the destination zone must be clear.
//! The resolver reports which of those are currently occupied.
//!
//! # Algorithm
//!
//! 1. Candidates = `adjacent(from_bay)` ∪ `path_bays(zone(from), zone(to))`.
//! 2. Drop `from_bay` and `to_bay` themselves.
//! 3. Keep only bays the occupancy view reports as occupied.
//!
//! The result is a `BTreeSet` so iteration order is stable.

use std::collections::{BTreeSet, HashSet};

use crate::layout::HangarLayout;
use crate::models::BayId;

/// Read-only view of which bays are occupied.
///
/// Implemented by the registry and by plain id sets, so dependency checks
/// can run against a live registry or a hand-built snapshot.
pub trait OccupancyView {
    fn is_occupied(&self, bay_id: &str) -> bool;
}

impl OccupancyView for HashSet<BayId> {
    fn is_occupied(&self, bay_id: &str) -> bool {
        self.contains(bay_id)
    }
}

impl OccupancyView for BTreeSet<BayId> {
    fn is_occupied(&self, bay_id: &str) -> bool {
        self.contains(bay_id)
    }
}

/// Computes movement dependencies over a layout.
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    layout: &'a HangarLayout,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(layout: &'a HangarLayout) -> Self {
        Self { layout }
    }

    /// Occupied bays that block a tow from `from_bay` to `to_bay`.
    ///
    /// Unknown bay ids yield no adjacency and resolve to the outside zone,
    /// so the result degrades to an empty or path-only set.
    pub fn dependencies<O: OccupancyView + ?Sized>(
        &self,
        from_bay: &str,
        to_bay: &str,
        occupancy: &O,
    ) -> BTreeSet<BayId> {
        self.layout
            .adjacent_bays(from_bay)
            .iter()
            .chain(self.layout.path_bays(from_bay, to_bay))
            .filter(|b| b.as_str() != from_bay && b.as_str() != to_bay)
            .filter(|b| occupancy.is_occupied(b))
            .cloned()
            .collect()
    }

    /// Whether any dependency exists for the tow.
    pub fn is_blocked<O: OccupancyView + ?Sized>(
        &self,
        from_bay: &str,
        to_bay: &str,
        occupancy: &O,
    ) -> bool {
        !self.dependencies(from_bay, to_bay, occupancy).is_empty()
    }
}
