//! Ordered in-memory collection of workouts.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::types::{Workout, WorkoutId};

/// Numeric field every workout kind carries, usable as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Distance in km
    Distance,
    /// Duration in minutes
    Duration,
}

impl SortField {
    fn value(&self, workout: &Workout) -> f64 {
        match self {
            SortField::Distance => workout.distance_km(),
            SortField::Duration => workout.duration_min(),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Distance => write!(f, "distance"),
            SortField::Duration => write!(f, "duration"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a sortable field: {0:?}")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "distance" | "distanceKm" => Ok(SortField::Distance),
            "duration" | "durationMin" => Ok(SortField::Duration),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Workouts in insertion order, or in the order of the last sort.
#[derive(Debug, Clone, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout.
    pub fn add(&mut self, workout: Workout) {
        debug_assert!(
            !self.contains(workout.id()),
            "duplicate workout id {}",
            workout.id()
        );
        self.workouts.push(workout);
    }

    /// Remove the workout with `id`, returning it. Absent ids are a no-op.
    pub fn remove(&mut self, id: &WorkoutId) -> Option<Workout> {
        let index = self.workouts.iter().position(|w| w.id() == id)?;
        Some(self.workouts.remove(index))
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn find_mut(&mut self, id: &WorkoutId) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id() == id)
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.find(id).is_some()
    }

    /// Stable reorder of the whole collection by `field`.
    pub fn sort_by(&mut self, field: SortField, direction: SortDirection) {
        match direction {
            SortDirection::Ascending => self
                .workouts
                .sort_by(|a, b| field.value(a).total_cmp(&field.value(b))),
            SortDirection::Descending => self
                .workouts
                .sort_by(|a, b| field.value(b).total_cmp(&field.value(a))),
        }
    }

    /// Read-only ordered view.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn ids(&self) -> impl Iterator<Item = &WorkoutId> {
        self.workouts.iter().map(Workout::id)
    }

    /// Empty the store, handing back what it held.
    pub fn clear(&mut self) -> Vec<Workout> {
        std::mem::take(&mut self.workouts)
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

impl From<Vec<Workout>> for WorkoutStore {
    fn from(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }
}
