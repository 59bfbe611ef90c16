//! Workout types and derived metrics.
//!
//! A workout is either a run or a ride. Both share identity, position, distance
//! and duration; each kind carries one extra input and exactly one metric
//! derived from distance and duration.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique workout identifier.
///
/// Fresh identifiers are random and are never handed out twice, so a deleted
/// workout's id cannot come back attached to a different workout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Mint a new identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic position in decimal degrees, serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coords: Coordinates) -> Self {
        [coords.lat, coords.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Kind of workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    /// Run, tracked with cadence and pace
    #[default]
    Running,
    /// Ride, tracked with elevation gain and speed
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag used in persisted records and CSS-like class names.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Emoji shown next to the workout on the map and in the list.
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutKind::Running => write!(f, "Running"),
            WorkoutKind::Cycling => write!(f, "Cycling"),
        }
    }
}

/// Error returned when a string names no known workout kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown workout kind: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Kind-specific input together with the metric derived for that kind.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutDetails {
    Running {
        /// Steps per minute
        cadence_spm: u32,
        /// Minutes per kilometre (derived)
        pace_min_per_km: f64,
    },
    Cycling {
        /// Metres climbed; may be zero or negative
        elevation_gain_m: f64,
        /// Kilometres per hour (derived)
        speed_km_per_h: f64,
    },
}

/// A logged workout.
///
/// Identity, position and kind are fixed at construction. The derived metric
/// and the description are recomputed on construction and whenever identity is
/// restored from persisted data.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    interaction_count: u32,
    description: String,
    details: WorkoutDetails,
}

impl Workout {
    /// Create a run. Distance and duration must be positive.
    pub fn running(coords: Coordinates, distance_km: f64, duration_min: f64, cadence_spm: u32) -> Self {
        Self::with_details(
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km: 0.0,
            },
        )
    }

    /// Create a ride. Distance and duration must be positive.
    pub fn cycling(
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self::with_details(
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h: 0.0,
            },
        )
    }

    fn with_details(
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
    ) -> Self {
        debug_assert!(distance_km > 0.0, "distance must be positive");
        debug_assert!(duration_min > 0.0, "duration must be positive");

        let mut workout = Self {
            id: WorkoutId::generate(),
            created_at: Utc::now(),
            coords,
            distance_km,
            duration_min,
            interaction_count: 0,
            description: String::new(),
            details,
        };
        workout.recompute_derived();
        workout
    }

    /// Overwrite the identity minted at construction with persisted values,
    /// then recompute everything derived from it.
    pub fn restore_identity(
        &mut self,
        id: WorkoutId,
        created_at: DateTime<Utc>,
        interaction_count: u32,
    ) {
        self.id = id;
        self.created_at = created_at;
        self.interaction_count = interaction_count;
        self.recompute_derived();
    }

    /// Recompute the kind's metric and the description from stored fields.
    pub fn recompute_derived(&mut self) {
        match &mut self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => *pace_min_per_km = self.duration_min / self.distance_km,
            WorkoutDetails::Cycling { speed_km_per_h, .. } => {
                *speed_km_per_h = self.distance_km / (self.duration_min / 60.0)
            }
        }

        let day = self.created_at.with_timezone(&Local).format("%B %-d");
        self.description = format!("{} on {}", self.kind(), day);
    }

    /// Record one explicit interaction with this workout.
    pub fn click(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    /// Human-readable summary, e.g. "Running on April 14".
    pub fn describe(&self) -> &str {
        &self.description
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace in min/km, for runs.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    /// Speed in km/h, for rides.
    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            WorkoutDetails::Running { .. } => None,
        }
    }

    /// Cadence in steps per minute, for runs.
    pub fn cadence_spm(&self) -> Option<u32> {
        match self.details {
            WorkoutDetails::Running { cadence_spm, .. } => Some(cadence_spm),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    /// Elevation gain in metres, for rides.
    pub fn elevation_gain_m(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => Some(elevation_gain_m),
            WorkoutDetails::Running { .. } => None,
        }
    }
}
