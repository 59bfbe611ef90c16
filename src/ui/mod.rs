//! User-facing surfaces: the workout form, the workout list and prompts.

pub mod form;
pub mod list;
pub mod prompt;

pub use form::{FormInput, ValidationError, WorkoutDraft, WorkoutForm};
pub use list::{EntryDetail, ListRenderer, MemoryListRenderer, WorkoutEntry};
pub use prompt::{invalid_input_message, Prompter, ScriptedPrompter};
