//! Workout id to map marker association.

use std::collections::HashMap;

use super::{MapView, MarkerHandle, PopupConfig};
use crate::storage::config::MapSettings;
use crate::workouts::{Workout, WorkoutId};

/// Tracks which marker belongs to which workout.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: HashMap<WorkoutId, MarkerHandle>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a marker for `workout`, replacing any marker it already had.
    pub fn place<M: MapView + ?Sized>(
        &mut self,
        map: &mut M,
        workout: &Workout,
        settings: &MapSettings,
    ) -> MarkerHandle {
        self.remove_for(map, workout.id());

        let popup = PopupConfig::for_workout(workout, settings);
        let handle = map.add_marker_with_popup(workout.coords(), popup);
        self.entries.insert(workout.id().clone(), handle);
        handle
    }

    /// Remove and dispose the marker for `id`. Returns whether one existed.
    pub fn remove_for<M: MapView + ?Sized>(&mut self, map: &mut M, id: &WorkoutId) -> bool {
        match self.entries.remove(id) {
            Some(handle) => {
                map.remove_marker(handle);
                true
            }
            None => false,
        }
    }

    /// Dispose every marker.
    pub fn clear_all<M: MapView + ?Sized>(&mut self, map: &mut M) {
        for (_, handle) in self.entries.drain() {
            map.remove_marker(handle);
        }
    }

    pub fn handle_for(&self, id: &WorkoutId) -> Option<MarkerHandle> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &WorkoutId> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
