//! Workout module: the workout model and the ordered store holding it.

pub mod store;
pub mod types;

pub use store::{SortDirection, SortField, UnknownSortField, WorkoutStore};
pub use types::{Coordinates, UnknownKind, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
