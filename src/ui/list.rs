//! Workout list capability and the entry view model renderers draw from.

use std::fmt;

use crate::workouts::{Workout, WorkoutDetails, WorkoutId, WorkoutKind};

/// List rendering capability.
pub trait ListRenderer {
    /// Show an entry for `workout`.
    fn render_entry(&mut self, workout: &Workout);

    /// Remove the entry for `id`, if shown.
    fn remove_entry(&mut self, id: &WorkoutId);

    /// Remove every entry.
    fn clear_all_entries(&mut self);
}

/// One labelled value in an entry, e.g. `⚡️ 5.0 min/km`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl EntryDetail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

impl fmt::Display for EntryDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.icon, self.value, self.unit)
    }
}

/// Everything a list entry displays for one workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub distance: EntryDetail,
    pub duration: EntryDetail,
    /// Pace for runs, speed for rides
    pub metric: EntryDetail,
    /// Cadence for runs, elevation gain for rides
    pub extra: EntryDetail,
}

impl From<&Workout> for WorkoutEntry {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        let (metric, extra) = match *workout.details() {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => (
                EntryDetail::new("⚡️", format!("{pace_min_per_km:.1}"), "min/km"),
                EntryDetail::new("🦶🏼", cadence_spm.to_string(), "spm"),
            ),
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => (
                EntryDetail::new("⚡️", format!("{speed_km_per_h:.1}"), "km/h"),
                EntryDetail::new("⛰", elevation_gain_m.to_string(), "m"),
            ),
        };

        Self {
            id: workout.id().clone(),
            kind,
            title: workout.describe().to_string(),
            distance: EntryDetail::new(kind.icon(), workout.distance_km().to_string(), "km"),
            duration: EntryDetail::new("⏱", workout.duration_min().to_string(), "min"),
            metric,
            extra,
        }
    }
}

impl fmt::Display for WorkoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {} | {} | {} | {}",
            self.id, self.title, self.distance, self.duration, self.metric, self.extra
        )
    }
}

/// Renderer that keeps entries in a vector, in render order.
#[derive(Debug, Default)]
pub struct MemoryListRenderer {
    entries: Vec<WorkoutEntry>,
}

impl MemoryListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<WorkoutId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }
}

impl ListRenderer for MemoryListRenderer {
    fn render_entry(&mut self, workout: &Workout) {
        self.entries.push(WorkoutEntry::from(workout));
    }

    fn remove_entry(&mut self, id: &WorkoutId) {
        self.entries.retain(|e| &e.id != id);
    }

    fn clear_all_entries(&mut self) {
        self.entries.clear();
    }
}
