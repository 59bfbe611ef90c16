//! State owned by one running session.

use std::collections::HashSet;

use crate::map::MarkerRegistry;
use crate::workouts::{WorkoutId, WorkoutStore};

/// The workout store and the marker registry that mirrors it on the map.
#[derive(Debug, Default)]
pub struct WorkoutContext {
    pub(crate) store: WorkoutStore,
    pub(crate) markers: MarkerRegistry,
}

impl WorkoutContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    /// Whether every stored workout has exactly one marker and no marker is orphaned.
    ///
    /// Only meaningful while a map is live. Without one no markers exist, so
    /// this is `false` for a non-empty store; see
    /// [`Controller::views_consistent`](crate::session::Controller::views_consistent).
    pub fn markers_match_store(&self) -> bool {
        let stored: HashSet<&WorkoutId> = self.store.ids().collect();
        let marked: HashSet<&WorkoutId> = self.markers.ids().collect();
        stored == marked
    }
}
