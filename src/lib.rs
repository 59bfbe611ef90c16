//! Mapty - map-based workout log
//!
//! Log runs and rides by picking a spot on a map and filling in a short form.
//! Workouts appear as map markers and list entries, and are kept across
//! sessions in a durable key-value store.

pub mod map;
pub mod session;
pub mod storage;
pub mod ui;
pub mod workouts;

// Re-export commonly used types
pub use session::{Controller, InteractionState, WorkoutContext};
pub use storage::config::AppConfig;
pub use storage::persistence::PersistenceAdapter;
pub use workouts::{Coordinates, Workout, WorkoutId, WorkoutKind, WorkoutStore};
