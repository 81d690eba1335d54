//! Hangar layout and towing cost model.
//!
//! A layout is configuration data mirroring the physical facility: a 2-D
//! grid position per bay, an adjacency graph, the hangar zone each bay
//! sits in, the bays that lie on the tow path between two zones, and the
//! bay clusters that suit each work type.
//!
//! # Towing cost
//!
//! ```text
//! distance       = euclidean(coord(from), coord(to))
//! towing_minutes = 15 + round(distance * 5)
//! total_minutes  = towing_minutes + 45        (approval overhead)
//! cost           = round(total_minutes / 15 * 50)
//! ```
//!
//! Unknown bay ids sit at grid origin `(0, 0)`, which keeps every cost
//! query total. The same holds for adjacency (empty) and zone (`Outside`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Bay, BayId, WorkType};

/// Fixed tow setup time (minutes).
pub const BASE_TOW_MINUTES: u64 = 15;
/// Tow time per grid unit travelled (minutes).
pub const MINUTES_PER_GRID_UNIT: f64 = 5.0;
/// Movement approval overhead added to every tow (minutes).
pub const APPROVAL_MINUTES: u64 = 45;
/// Billing block length (minutes).
pub const BILLING_BLOCK_MINUTES: f64 = 15.0;
/// Price of one billing block (dollars).
pub const RATE_PER_BLOCK: f64 = 50.0;

/// Integer grid coordinate of a bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const ORIGIN: GridPoint = GridPoint { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in grid units.
    pub fn distance(&self, other: &GridPoint) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Hangar zone a bay belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HangarZone {
    Hangar1,
    Hangar2,
    Hangar3,
    Outside,
}

/// Breakdown of a single tow estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowingEstimate {
    pub distance: f64,
    pub towing_minutes: u64,
    pub total_minutes: u64,
    pub cost: u64,
}

#[derive(Debug, Clone)]
struct ZonePath {
    from: HangarZone,
    to: HangarZone,
    bays: Vec<BayId>,
}

impl ZonePath {
    fn connects(&self, from: HangarZone, to: HangarZone) -> bool {
        self.from == from && self.to == to
    }
}

/// Physical layout of a hangar facility.
#[derive(Debug, Clone, Default)]
pub struct HangarLayout {
    coordinates: HashMap<BayId, GridPoint>,
    zones: HashMap<BayId, HangarZone>,
    adjacency: HashMap<BayId, Vec<BayId>>,
    paths: Vec<ZonePath>,
    clusters: HashMap<WorkType, Vec<BayId>>,
}

impl HangarLayout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// The HAECO three-hangar facility.
    ///
    /// Top line: hangars 1-3 plus stand P. Middle line: A, B (hangar 1),
    /// F (hangar 2), J (hangar 3), Q. Bottom line: the open apron.
    pub fn standard() -> Self {
        use HangarZone::*;

        let bays: [(&str, i32, i32, HangarZone); 23] = [
            ("1", 0, 0, Hangar1),
            ("2", 1, 0, Hangar1),
            ("3", 2, 0, Hangar1),
            ("4", 4, 0, Hangar2),
            ("5", 5, 0, Hangar2),
            ("6", 6, 0, Hangar2),
            ("7", 8, 0, Hangar3),
            ("8", 9, 0, Hangar3),
            ("P", 11, 0, Outside),
            ("A", 0, 2, Hangar1),
            ("B", 1, 2, Hangar1),
            ("F", 5, 2, Hangar2),
            ("J", 8, 2, Hangar3),
            ("Q", 11, 2, Outside),
            ("C", 0, 4, Outside),
            ("D", 1, 4, Outside),
            ("E", 2, 4, Outside),
            ("G", 4, 4, Outside),
            ("H", 5, 4, Outside),
            ("K", 6, 4, Outside),
            ("L", 7, 4, Outside),
            ("N", 8, 4, Outside),
            ("R", 11, 4, Outside),
        ];

        let adjacency: [(&str, &[&str]); 23] = [
            ("1", &["2", "A"]),
            ("2", &["1", "3", "B"]),
            ("3", &["2", "C"]),
            ("4", &["5", "F"]),
            ("5", &["4", "6"]),
            ("6", &["5", "F"]),
            ("7", &["8", "J"]),
            ("8", &["7", "J"]),
            ("P", &["Q"]),
            ("A", &["1", "B", "C"]),
            ("B", &["2", "A", "D"]),
            ("F", &["4", "6", "G", "H"]),
            ("J", &["7", "8", "L", "N"]),
            ("Q", &["P", "R"]),
            ("C", &["3", "A", "D"]),
            ("D", &["C", "B", "E"]),
            ("E", &["D"]),
            ("G", &["F", "H"]),
            ("H", &["G", "F", "K"]),
            ("K", &["H", "L"]),
            ("L", &["K", "J", "N"]),
            ("N", &["L", "J"]),
            ("R", &["Q"]),
        ];

        let mut layout = bays
            .iter()
            .fold(Self::new(), |l, &(id, x, y, zone)| l.with_bay(id, x, y, zone));
        for (id, neighbours) in adjacency {
            layout = layout.with_adjacency(id, neighbours);
        }

        layout
            .with_path(Hangar1, Hangar2, &["4"])
            .with_path(Hangar2, Hangar3, &["6", "7"])
            .with_path(Hangar1, Outside, &["3", "C"])
            .with_path(Hangar2, Outside, &["F", "G"])
            .with_path(Hangar3, Outside, &["J", "L"])
            .with_cluster(WorkType::Paint, &["1", "3", "7", "8"])
            .with_cluster(WorkType::Maintenance, &["A", "B", "J", "2", "4", "6"])
            .with_cluster(WorkType::Inspection, &["1", "2", "3", "4", "6", "7", "8"])
            .with_cluster(
                WorkType::Storage,
                &["C", "D", "E", "F", "G", "H", "K", "L", "N", "P", "Q", "R"],
            )
    }

    /// Places a bay on the grid inside a zone.
    pub fn with_bay(mut self, id: impl Into<BayId>, x: i32, y: i32, zone: HangarZone) -> Self {
        let id = id.into();
        self.coordinates.insert(id.clone(), GridPoint::new(x, y));
        self.zones.insert(id, zone);
        self
    }

    /// Sets the neighbours of a bay (directed: `id` → `neighbours`).
    pub fn with_adjacency(mut self, id: impl Into<BayId>, neighbours: &[&str]) -> Self {
        self.adjacency
            .insert(id.into(), neighbours.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Declares the bays a tow crosses going from one zone to another.
    ///
    /// Paths are directed: the reverse tow has no path bays unless it is
    /// declared separately.
    pub fn with_path(mut self, from: HangarZone, to: HangarZone, bays: &[&str]) -> Self {
        self.paths.retain(|p| !p.connects(from, to));
        self.paths.push(ZonePath {
            from,
            to,
            bays: bays.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Declares the bays that suit a work type.
    pub fn with_cluster(mut self, work_type: WorkType, bays: &[&str]) -> Self {
        self.clusters
            .insert(work_type, bays.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Grid position, falling back to the origin for unknown bays.
    pub fn coordinate(&self, bay_id: &str) -> GridPoint {
        self.coordinates
            .get(bay_id)
            .copied()
            .unwrap_or(GridPoint::ORIGIN)
    }

    /// Whether the layout knows this bay.
    pub fn contains(&self, bay_id: &str) -> bool {
        self.coordinates.contains_key(bay_id)
    }

    /// Euclidean grid distance between two bays.
    pub fn distance(&self, from: &str, to: &str) -> f64 {
        self.coordinate(from).distance(&self.coordinate(to))
    }

    /// Full tow estimate between two bays.
    pub fn estimate(&self, from: &str, to: &str) -> TowingEstimate {
        let distance = self.distance(from, to);
        let towing_minutes = BASE_TOW_MINUTES + (distance * MINUTES_PER_GRID_UNIT).round() as u64;
        let total_minutes = towing_minutes + APPROVAL_MINUTES;
        let cost = (total_minutes as f64 / BILLING_BLOCK_MINUTES * RATE_PER_BLOCK).round() as u64;
        TowingEstimate {
            distance,
            towing_minutes,
            total_minutes,
            cost,
        }
    }

    /// Towing cost in dollars. Symmetric, and non-decreasing in distance.
    pub fn towing_cost(&self, from: &str, to: &str) -> u64 {
        self.estimate(from, to).cost
    }

    /// Bays physically next to `bay_id`.
    pub fn adjacent_bays(&self, bay_id: &str) -> &[BayId] {
        self.adjacency
            .get(bay_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        self.adjacent_bays(a).iter().any(|n| n == b)
    }

    /// Zone of a bay; unknown bays are treated as outside.
    pub fn zone(&self, bay_id: &str) -> HangarZone {
        self.zones
            .get(bay_id)
            .copied()
            .unwrap_or(HangarZone::Outside)
    }

    /// Bays on the tow path from the zone of `from` to the zone of `to`.
    ///
    /// Empty when both bays share a zone or no path is declared for that
    /// direction.
    pub fn path_bays(&self, from: &str, to: &str) -> &[BayId] {
        let (zf, zt) = (self.zone(from), self.zone(to));
        if zf == zt {
            return &[];
        }
        self.paths
            .iter()
            .find(|p| p.connects(zf, zt))
            .map(|p| p.bays.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `bay_id` is in the preferred cluster for `work_type`.
    pub fn in_cluster(&self, work_type: WorkType, bay_id: &str) -> bool {
        self.clusters
            .get(&work_type)
            .is_some_and(|c| c.iter().any(|b| b == bay_id))
    }
}

/// Bays of the standard facility, in display order.
///
/// Paint: 1, 3, 7, 8. In: 2, 4, 6. Special: 5 (small aircraft only).
/// Everything else is an outer bay; A, B and J can take MTE.
pub fn standard_bays() -> Vec<Bay> {
    let mut bays = Vec::with_capacity(23);
    for id in ["1", "2", "3", "4", "5", "6", "7", "8"] {
        bays.push(match id {
            "1" | "3" | "7" | "8" => Bay::paint(id),
            "5" => Bay::special(id),
            _ => Bay::in_bay(id),
        });
    }
    for id in ["A", "B", "J"] {
        bays.push(Bay::outer(id).with_mte_capability());
    }
    for id in ["C", "D", "E", "F", "G", "H", "K", "L", "N", "P", "Q", "R"] {
        bays.push(Bay::outer(id));
    }
    bays
}
