//! Saving and restoring the workout list.
//!
//! The whole ordered list is stored as one JSON array under a single key.
//! Records are tagged by `kind`; loading switches on the tag, rebuilds the
//! matching workout, restores its identity and recomputes derived values.
//! Records written by older versions (`type`, `coords`, `distance`, `date`,
//! `clicks`, ...) are read as well.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

use super::durable::{DurableStore, StorageError};
use crate::workouts::{Coordinates, Workout, WorkoutDetails, WorkoutId, WorkoutKind};

/// Key the workout list is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "workouts";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunningRecord {
    id: String,
    #[serde(alias = "coords")]
    coordinates: Coordinates,
    #[serde(alias = "distance")]
    distance_km: f64,
    #[serde(alias = "duration")]
    duration_min: f64,
    #[serde(alias = "cadence")]
    cadence_spm: f64,
    #[serde(alias = "date")]
    created_at: DateTime<Utc>,
    #[serde(default, alias = "clicks")]
    interaction_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CyclingRecord {
    id: String,
    #[serde(alias = "coords")]
    coordinates: Coordinates,
    #[serde(alias = "distance")]
    distance_km: f64,
    #[serde(alias = "duration")]
    duration_min: f64,
    #[serde(alias = "elevationGain")]
    elevation_gain_m: f64,
    #[serde(alias = "date")]
    created_at: DateTime<Utc>,
    #[serde(default, alias = "clicks")]
    interaction_count: u32,
}

/// On-disk shape of one workout.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum WorkoutRecord {
    Running(RunningRecord),
    Cycling(CyclingRecord),
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let id = workout.id().to_string();
        let coordinates = workout.coords();
        let distance_km = workout.distance_km();
        let duration_min = workout.duration_min();
        let created_at = workout.created_at();
        let interaction_count = workout.interaction_count();

        match *workout.details() {
            WorkoutDetails::Running { cadence_spm, .. } => WorkoutRecord::Running(RunningRecord {
                id,
                coordinates,
                distance_km,
                duration_min,
                cadence_spm: f64::from(cadence_spm),
                created_at,
                interaction_count,
            }),
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => WorkoutRecord::Cycling(CyclingRecord {
                id,
                coordinates,
                distance_km,
                duration_min,
                elevation_gain_m,
                created_at,
                interaction_count,
            }),
        }
    }
}

/// Why a single persisted record was dropped.
#[derive(Debug, Error)]
enum RecordError {
    #[error("no kind tag")]
    MissingKind,

    #[error("unknown kind {0:?}")]
    UnknownKind(String),

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid {0}")]
    InvalidValue(&'static str),
}

fn check_common(
    id: &str,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
) -> Result<(), RecordError> {
    if id.is_empty() {
        return Err(RecordError::InvalidValue("id"));
    }
    if !coordinates.is_finite() {
        return Err(RecordError::InvalidValue("coordinates"));
    }
    if !(distance_km.is_finite() && distance_km > 0.0) {
        return Err(RecordError::InvalidValue("distance"));
    }
    if !(duration_min.is_finite() && duration_min > 0.0) {
        return Err(RecordError::InvalidValue("duration"));
    }
    Ok(())
}

impl RunningRecord {
    fn into_workout(self) -> Result<Workout, RecordError> {
        check_common(&self.id, self.coordinates, self.distance_km, self.duration_min)?;
        let cadence = self.cadence_spm.round();
        if !(cadence.is_finite() && cadence >= 1.0 && cadence <= f64::from(u32::MAX)) {
            return Err(RecordError::InvalidValue("cadence"));
        }

        let mut workout = Workout::running(
            self.coordinates,
            self.distance_km,
            self.duration_min,
            cadence as u32,
        );
        workout.restore_identity(
            WorkoutId::from(self.id),
            self.created_at,
            self.interaction_count,
        );
        Ok(workout)
    }
}

impl CyclingRecord {
    fn into_workout(self) -> Result<Workout, RecordError> {
        check_common(&self.id, self.coordinates, self.distance_km, self.duration_min)?;
        if !self.elevation_gain_m.is_finite() {
            return Err(RecordError::InvalidValue("elevation gain"));
        }

        let mut workout = Workout::cycling(
            self.coordinates,
            self.distance_km,
            self.duration_min,
            self.elevation_gain_m,
        );
        workout.restore_identity(
            WorkoutId::from(self.id),
            self.created_at,
            self.interaction_count,
        );
        Ok(workout)
    }
}

fn decode_record(value: Value) -> Result<Workout, RecordError> {
    let kind = {
        let tag = value
            .get("kind")
            .or_else(|| value.get("type"))
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingKind)?;
        tag.parse::<WorkoutKind>()
            .map_err(|_| RecordError::UnknownKind(tag.to_string()))?
    };

    match kind {
        WorkoutKind::Running => serde_json::from_value::<RunningRecord>(value)?.into_workout(),
        WorkoutKind::Cycling => serde_json::from_value::<CyclingRecord>(value)?.into_workout(),
    }
}

/// Reads and writes the workout list through a durable store.
#[derive(Debug)]
pub struct PersistenceAdapter<D: DurableStore> {
    durable: D,
    key: String,
}

impl<D: DurableStore> PersistenceAdapter<D> {
    /// Persist under `key` in `durable`.
    pub fn new(durable: D, key: impl Into<String>) -> Self {
        Self {
            durable,
            key: key.into(),
        }
    }

    /// Persist under [`DEFAULT_STORAGE_KEY`].
    pub fn with_default_key(durable: D) -> Self {
        Self::new(durable, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    /// Overwrite the stored value with `workouts`, in order.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), PersistenceError> {
        let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
        let json = serde_json::to_string(&records)?;
        self.durable.set(&self.key, &json)?;

        tracing::debug!("Saved {} workouts under {:?}", records.len(), self.key);
        Ok(())
    }

    /// Rebuild the stored workouts.
    ///
    /// A missing, unreadable or unparseable value yields an empty list.
    /// Individual records with an unknown kind, missing fields, invalid values
    /// or an id already seen earlier in the list are skipped.
    pub fn load(&self) -> Vec<Workout> {
        let raw = match self.durable.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No persisted workouts under {:?}", self.key);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Could not read persisted workouts, starting empty: {}", e);
                return Vec::new();
            }
        };

        let records: Option<Vec<Value>> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Persisted workouts are corrupt, starting empty: {}", e);
                return Vec::new();
            }
        };
        let Some(records) = records else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut workouts = Vec::with_capacity(records.len());
        for (index, value) in records.into_iter().enumerate() {
            match decode_record(value) {
                Ok(workout) if !seen.insert(workout.id().clone()) => {
                    tracing::warn!(
                        "Skipping persisted workout #{}: duplicate id {}",
                        index,
                        workout.id()
                    );
                }
                Ok(workout) => workouts.push(workout),
                Err(e) => tracing::warn!("Skipping persisted workout #{}: {}", index, e),
            }
        }

        tracing::info!("Restored {} workouts", workouts.len());
        workouts
    }

    /// Delete the stored value entirely.
    pub fn reset(&mut self) -> Result<(), PersistenceError> {
        self.durable.remove(&self.key)?;
        tracing::info!("Cleared persisted workouts under {:?}", self.key);
        Ok(())
    }
}

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
