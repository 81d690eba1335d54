//! Domain registry.
//!
//! Owns the canonical bay and aircraft collections. Every change to
//! occupancy goes through [`Registry::assign`] or [`Registry::vacate`]
//! (plus the fleet helpers built on them), which check all preconditions
//! before touching state, so a failed call leaves the registry unchanged.
//!
//! # Occupancy model
//!
//! A bay's `occupant` is the aircraft most recently assigned to it. Other
//! aircraft may keep time-disjoint bookings on the same bay (their
//! `current_bay` points at it); overlapping stays are rejected with
//! [`AssignmentError::TimeConflict`]. `vacate` releases the occupant only
//! and is idempotent.
//!
//! # Concurrency
//!
//! The registry is plain owned data (`Send + Sync`). Callers sharing it
//! across threads wrap it in a single lock; read-only queries can run
//! against a clone.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rand::Rng;
use std::collections::{BTreeSet, HashMap};

use crate::config::EngineConfig;
use crate::dependency::{DependencyResolver, OccupancyView};
use crate::error::{AssignmentError, SnapshotError};
use crate::layout::{standard_bays, HangarLayout};
use crate::models::{Aircraft, AircraftId, AircraftStatus, Bay, BayId, Movement, NewAircraft};
use crate::scoring::ScoringContext;
use crate::validation::{is_compatible, validate_snapshot};

/// Number of MTE units in the facility.
pub const MTE_UNITS: usize = 2;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 12;

/// In-memory bay and aircraft registry.
#[derive(Debug, Clone)]
pub struct Registry {
    layout: HangarLayout,
    bays: Vec<Bay>,
    bay_index: HashMap<BayId, usize>,
    aircraft: Vec<Aircraft>,
}

impl Registry {
    /// The standard facility with no aircraft.
    pub fn standard() -> Self {
        let bays = standard_bays();
        let bay_index = index_bays(&bays);
        Self {
            layout: HangarLayout::standard(),
            bays,
            bay_index,
            aircraft: Vec::new(),
        }
    }

    /// Adopts a snapshot supplied by a persistence layer.
    ///
    /// Bay order is kept as given and defines the order of
    /// [`available_bay_ids`](Self::available_bay_ids).
    pub fn from_snapshot(
        layout: HangarLayout,
        bays: Vec<Bay>,
        aircraft: Vec<Aircraft>,
    ) -> Result<Self, SnapshotError> {
        validate_snapshot(&bays, &aircraft).map_err(SnapshotError)?;
        let bay_index = index_bays(&bays);
        Ok(Self {
            layout,
            bays,
            bay_index,
            aircraft,
        })
    }

    // ======================== Queries ========================

    pub fn layout(&self) -> &HangarLayout {
        &self.layout
    }

    /// All bays, in configuration order.
    pub fn bays(&self) -> &[Bay] {
        &self.bays
    }

    pub fn bay(&self, bay_id: &str) -> Option<&Bay> {
        self.bay_index.get(bay_id).map(|&i| &self.bays[i])
    }

    /// All aircraft, in registration order.
    pub fn fleet(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn aircraft(&self, aircraft_id: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| a.id == aircraft_id)
    }

    /// Aircraft without a bay booking, in registration order.
    pub fn unassigned_aircraft(&self) -> Vec<&Aircraft> {
        self.aircraft.iter().filter(|a| !a.is_assigned()).collect()
    }

    /// Ids of unoccupied bays, in configuration order.
    pub fn available_bay_ids(&self) -> Vec<BayId> {
        self.bays
            .iter()
            .filter(|b| !b.is_occupied())
            .map(|b| b.id.clone())
            .collect()
    }

    /// Whether no other aircraft holds `bay_id` during `[start, end)`.
    pub fn is_bay_available_for_period(
        &self,
        bay_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<&str>,
    ) -> bool {
        self.conflicting_booking(bay_id, start, end, exclude).is_none()
    }

    /// Aircraft booked on `bay_id` whose stay covers `instant`.
    pub fn aircraft_for_bay_on(&self, bay_id: &str, instant: DateTime<Utc>) -> Vec<&Aircraft> {
        self.aircraft
            .iter()
            .filter(|a| a.current_bay.as_deref() == Some(bay_id) && a.is_present_at(instant))
            .collect()
    }

    /// Aircraft booked on `bay_id` at any point of the UTC day `date`.
    pub fn aircraft_for_bay_on_day(&self, bay_id: &str, date: NaiveDate) -> Vec<&Aircraft> {
        let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
        let end = start
            .checked_add_days(Days::new(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.aircraft
            .iter()
            .filter(|a| {
                a.current_bay.as_deref() == Some(bay_id)
                    && a.arrival_time < end
                    && a.departure_time >= start
            })
            .collect()
    }

    /// Towing cost between two bays (unknown ids sit at the grid origin).
    pub fn towing_cost(&self, from: &str, to: &str) -> u64 {
        self.layout.towing_cost(from, to)
    }

    /// Occupied bays blocking a tow from `from` to `to`.
    pub fn dependencies(&self, from: &str, to: &str) -> BTreeSet<BayId> {
        DependencyResolver::new(&self.layout).dependencies(from, to, self)
    }

    /// Plans a tow of an assigned aircraft to `to_bay`.
    ///
    /// Returns `Ok(None)` when the aircraft holds no bay.
    pub fn plan_movement(
        &self,
        aircraft_id: &str,
        to_bay: &str,
    ) -> Result<Option<Movement>, AssignmentError> {
        let aircraft = self
            .aircraft(aircraft_id)
            .ok_or_else(|| AssignmentError::UnknownAircraft(aircraft_id.to_string()))?;
        if self.bay(to_bay).is_none() {
            return Err(AssignmentError::UnknownBay(to_bay.to_string()));
        }
        let Some(from) = aircraft.current_bay.as_deref() else {
            return Ok(None);
        };

        let movement = Movement {
            aircraft_id: aircraft.id.clone(),
            from_bay: from.to_string(),
            to_bay: to_bay.to_string(),
            cost: self.towing_cost(from, to_bay),
            dependencies: self.dependencies(from, to_bay),
        };
        tracing::debug!(
            aircraft = %movement.aircraft_id,
            from = %movement.from_bay,
            to = %movement.to_bay,
            cost = movement.cost,
            blocked_by = movement.dependencies.len(),
            "movement planned"
        );
        Ok(Some(movement))
    }

    /// Scoring context over this registry.
    pub fn scoring_context(&self, now: DateTime<Utc>, config: &EngineConfig) -> ScoringContext<'_> {
        ScoringContext::new(&self.layout, self, &self.aircraft, now)
            .with_default_towing_cost(config.default_towing_cost)
    }

    // ======================== Assignment ========================

    /// Places an aircraft in a bay.
    ///
    /// Checks compatibility, then that no other aircraft holds the bay
    /// during the stay. If the aircraft is booked elsewhere, that booking
    /// is released first.
    pub fn assign(&mut self, aircraft_id: &str, bay_id: &str) -> Result<(), AssignmentError> {
        let ai = self.aircraft_position(aircraft_id)?;
        let bi = self.bay_position(bay_id)?;

        let (arrival, departure) = {
            let aircraft = &self.aircraft[ai];
            if !is_compatible(aircraft, &self.bays[bi]) {
                return Err(AssignmentError::IncompatibleAssignment {
                    aircraft: aircraft.registration.clone(),
                    bay: bay_id.to_string(),
                });
            }
            (aircraft.arrival_time, aircraft.departure_time)
        };

        if let Some(conflicting) = self.conflicting_booking(bay_id, arrival, departure, Some(aircraft_id)) {
            return Err(AssignmentError::TimeConflict {
                bay: bay_id.to_string(),
                conflicting: conflicting.id.clone(),
            });
        }

        if self.aircraft[ai]
            .current_bay
            .as_deref()
            .is_some_and(|prev| prev != bay_id)
        {
            self.release_booking(ai);
        }

        self.bays[bi].occupant = Some(aircraft_id.to_string());
        let aircraft = &mut self.aircraft[ai];
        aircraft.current_bay = Some(bay_id.to_string());
        aircraft.status = AircraftStatus::Assigned;

        tracing::info!(aircraft = %aircraft.registration, bay = %bay_id, "bay assigned");
        Ok(())
    }

    /// Clears a bay. The occupant (if any) becomes unassigned.
    ///
    /// Vacating an empty bay succeeds and changes nothing.
    pub fn vacate(&mut self, bay_id: &str) -> Result<(), AssignmentError> {
        let bi = self.bay_position(bay_id)?;
        self.clear_occupant(bi);
        Ok(())
    }

    // ======================== Fleet ========================

    /// Registers a new aircraft under a generated id.
    pub fn add_aircraft(&mut self, request: NewAircraft) -> Result<AircraftId, AssignmentError> {
        self.add_aircraft_with_rng(request, &mut rand::rng())
    }

    /// Registers a new aircraft, drawing its id from `rng`.
    pub fn add_aircraft_with_rng<R: Rng + ?Sized>(
        &mut self,
        request: NewAircraft,
        rng: &mut R,
    ) -> Result<AircraftId, AssignmentError> {
        if request.arrival_time >= request.departure_time {
            return Err(AssignmentError::InvalidTimeWindow(request.registration));
        }
        let id = loop {
            let candidate = generate_id(rng);
            if self.aircraft(&candidate).is_none() {
                break candidate;
            }
        };
        let aircraft = Aircraft::from_request(id.clone(), request);
        tracing::info!(aircraft = %aircraft.registration, work = ?aircraft.work_type, "aircraft added");
        self.aircraft.push(aircraft);
        Ok(id)
    }

    /// Registers an aircraft with a caller-chosen id.
    ///
    /// A pre-set `current_bay` is applied through [`assign`](Self::assign);
    /// if that fails the aircraft is not kept.
    pub fn insert_aircraft(&mut self, mut aircraft: Aircraft) -> Result<(), AssignmentError> {
        if self.aircraft(&aircraft.id).is_some() {
            return Err(AssignmentError::DuplicateAircraft(aircraft.id));
        }
        if !aircraft.has_valid_stay() {
            return Err(AssignmentError::InvalidTimeWindow(aircraft.registration));
        }

        let target = aircraft.current_bay.take();
        aircraft.status = AircraftStatus::Scheduled;
        let id = aircraft.id.clone();
        self.aircraft.push(aircraft);

        if let Some(bay_id) = target {
            if let Err(e) = self.assign(&id, &bay_id) {
                self.aircraft.pop();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Drops an aircraft's booking, whether or not it is the occupant.
    pub fn release_aircraft(&mut self, aircraft_id: &str) -> Result<(), AssignmentError> {
        let ai = self.aircraft_position(aircraft_id)?;
        self.release_booking(ai);
        Ok(())
    }

    /// Removes an aircraft, releasing its booking first.
    pub fn remove_aircraft(&mut self, aircraft_id: &str) -> Result<Aircraft, AssignmentError> {
        let ai = self.aircraft_position(aircraft_id)?;
        self.release_booking(ai);
        let removed = self.aircraft.remove(ai);
        tracing::info!(aircraft = %removed.registration, "aircraft removed");
        Ok(removed)
    }

    // ======================== MTE ========================

    /// Number of bays currently running MTE.
    pub fn active_mte_count(&self) -> usize {
        self.bays.iter().filter(|b| b.is_mte_active()).count()
    }

    pub fn mte_units_available(&self) -> usize {
        MTE_UNITS.saturating_sub(self.active_mte_count())
    }

    /// Deploys MTE to a capable bay, making it an In bay.
    pub fn activate_mte(&mut self, bay_id: &str) -> Result<(), AssignmentError> {
        let bi = self.bay_position(bay_id)?;
        if !self.bays[bi].mte_capable {
            return Err(AssignmentError::MteNotSupported(bay_id.to_string()));
        }
        if self.bays[bi].is_mte_active() {
            return Ok(());
        }
        if self.mte_units_available() == 0 {
            return Err(AssignmentError::MteUnavailable(MTE_UNITS));
        }
        self.bays[bi].mte_active = true;
        tracing::info!(bay = %bay_id, remaining = self.mte_units_available(), "MTE activated");
        Ok(())
    }

    /// Withdraws MTE from a bay.
    ///
    /// Refused while the occupant would be incompatible with the bay's
    /// configured kind.
    pub fn deactivate_mte(&mut self, bay_id: &str) -> Result<(), AssignmentError> {
        let bi = self.bay_position(bay_id)?;
        if !self.bays[bi].is_mte_active() {
            return Ok(());
        }

        let downgraded = self.bays[bi].clone().with_mte_active(false);
        if let Some(occupant) = downgraded.occupant().and_then(|id| self.aircraft(id)) {
            if !is_compatible(occupant, &downgraded) {
                return Err(AssignmentError::IncompatibleAssignment {
                    aircraft: occupant.registration.clone(),
                    bay: bay_id.to_string(),
                });
            }
        }

        self.bays[bi].mte_active = false;
        tracing::info!(bay = %bay_id, "MTE deactivated");
        Ok(())
    }

    // ======================== Internals ========================

    fn aircraft_position(&self, aircraft_id: &str) -> Result<usize, AssignmentError> {
        self.aircraft
            .iter()
            .position(|a| a.id == aircraft_id)
            .ok_or_else(|| AssignmentError::UnknownAircraft(aircraft_id.to_string()))
    }

    fn bay_position(&self, bay_id: &str) -> Result<usize, AssignmentError> {
        self.bay_index
            .get(bay_id)
            .copied()
            .ok_or_else(|| AssignmentError::UnknownBay(bay_id.to_string()))
    }

    fn conflicting_booking(
        &self,
        bay_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<&str>,
    ) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| {
            Some(a.id.as_str()) != exclude
                && a.current_bay.as_deref() == Some(bay_id)
                && a.overlaps(start, end)
        })
    }

    /// Empties the bay at `bi`, unbooking its occupant.
    fn clear_occupant(&mut self, bi: usize) {
        let Some(occupant) = self.bays[bi].occupant.take() else {
            return;
        };
        let bay_id = self.bays[bi].id.as_str();

        if let Some(aircraft) = self.aircraft.iter_mut().find(|a| a.id == occupant) {
            if aircraft.current_bay.as_deref() == Some(bay_id) {
                aircraft.current_bay = None;
                aircraft.status = AircraftStatus::Available;
            }
        }

        tracing::info!(bay = %bay_id, aircraft = %occupant, "bay vacated");
    }

    /// Clears the booking of the aircraft at `ai`, emptying the bay when
    /// it is the occupant.
    fn release_booking(&mut self, ai: usize) {
        let Some(bay_id) = self.aircraft[ai].current_bay.as_deref() else {
            return;
        };
        let held_bay = self
            .bay_index
            .get(bay_id)
            .copied()
            .filter(|&bi| self.bays[bi].occupant() == Some(self.aircraft[ai].id.as_str()));

        match held_bay {
            Some(bi) => self.clear_occupant(bi),
            None => {
                let aircraft = &mut self.aircraft[ai];
                aircraft.current_bay = None;
                aircraft.status = AircraftStatus::Available;
            }
        }
    }
}

impl OccupancyView for Registry {
    fn is_occupied(&self, bay_id: &str) -> bool {
        self.bay(bay_id).is_some_and(Bay::is_occupied)
    }
}

fn index_bays(bays: &[Bay]) -> HashMap<BayId, usize> {
    bays.iter()
        .enumerate()
        .map(|(i, b)| (b.id.clone(), i))
        .collect()
}

fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
