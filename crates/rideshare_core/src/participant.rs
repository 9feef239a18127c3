//! Participant records handed to the engine by the participant store.
//!
//! Drivers and riders share one shape and are told apart by [`Role`]. Records
//! are immutable once loaded; the engine only reads them.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Stable participant identifier. Ordering is numeric and drives the
/// deterministic tie-break between equally good matchings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Driver,
    Rider,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Driver => f.write_str("driver"),
            Role::Rider => f.write_str("rider"),
        }
    }
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn check(&self) -> Result<(), String> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(format!("non-finite coordinate ({}, {})", self.lat, self.lon));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!("latitude {} outside [-90, 90]", self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(format!("longitude {} outside [-180, 180]", self.lon));
        }
        Ok(())
    }
}

/// A driver or rider with trip geometry and an optional scheduling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub role: Role,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    /// Length of the solo trip in km, or in degrees for Manhattan runs.
    pub trip_length_km: f64,
    /// Scheduling attributes (minutes). Only consulted by the time-window
    /// feasibility rule.
    #[serde(default)]
    pub earliest_time: Option<f64>,
    #[serde(default)]
    pub latest_time: Option<f64>,
    #[serde(default)]
    pub announce_time: Option<f64>,
}

impl Participant {
    pub fn new(
        id: u64,
        role: Role,
        origin: GeoPoint,
        destination: GeoPoint,
        trip_length_km: f64,
    ) -> Self {
        Self {
            id: ParticipantId(id),
            role,
            origin,
            destination,
            trip_length_km,
            earliest_time: None,
            latest_time: None,
            announce_time: None,
        }
    }

    pub fn driver(id: u64, origin: GeoPoint, destination: GeoPoint, trip_length_km: f64) -> Self {
        Self::new(id, Role::Driver, origin, destination, trip_length_km)
    }

    pub fn rider(id: u64, origin: GeoPoint, destination: GeoPoint, trip_length_km: f64) -> Self {
        Self::new(id, Role::Rider, origin, destination, trip_length_km)
    }

    pub fn with_window(mut self, earliest: f64, latest: f64) -> Self {
        self.earliest_time = Some(earliest);
        self.latest_time = Some(latest);
        self
    }

    pub fn with_announce_time(mut self, announce: f64) -> Self {
        self.announce_time = Some(announce);
        self
    }

    /// Scheduling window, when both ends are known.
    pub fn window(&self) -> Option<(f64, f64)> {
        match (self.earliest_time, self.latest_time) {
            (Some(earliest), Some(latest)) => Some((earliest, latest)),
            _ => None,
        }
    }

    /// Checks coordinates and trip length. A zero trip length is accepted
    /// here; weight strategies that divide by it reject it themselves.
    pub fn validate(&self) -> Result<(), MatchError> {
        let invalid = |reason: String| MatchError::InvalidInput {
            id: self.id,
            reason,
        };
        self.origin
            .check()
            .map_err(|reason| invalid(format!("origin: {reason}")))?;
        self.destination
            .check()
            .map_err(|reason| invalid(format!("destination: {reason}")))?;
        if !self.trip_length_km.is_finite() || self.trip_length_km < 0.0 {
            return Err(invalid(format!(
                "trip length {} must be finite and non-negative",
                self.trip_length_km
            )));
        }
        Ok(())
    }
}

/// Validates a whole role collection: every record well formed, tagged with
/// `role`, and no id repeated.
pub fn validate_population(participants: &[Participant], role: Role) -> Result<(), MatchError> {
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if participant.role != role {
            return Err(MatchError::WrongRole {
                id: participant.id,
                expected: role,
                found: participant.role,
            });
        }
        participant.validate()?;
        if !seen.insert(participant.id) {
            return Err(MatchError::DuplicateId {
                id: participant.id,
                role,
            });
        }
    }
    Ok(())
}
