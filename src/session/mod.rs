//! Session module: the context a session owns and the controller driving it.

pub mod context;
pub mod controller;

pub use context::WorkoutContext;
pub use controller::{Controller, InteractionState, SubmitError};
