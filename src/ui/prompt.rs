//! Confirmation and alert capability.

use std::collections::VecDeque;

use crate::workouts::WorkoutKind;

pub const CONFIRM_DELETE: &str = "❓ Are you sure you want to delete this workout?";
pub const CONFIRM_DELETE_ALL: &str =
    "⚠️ Are you sure you want to delete ALL workouts? This cannot be undone!";
pub const WORKOUT_DELETED: &str = "✅ Workout deleted successfully!";
pub const ALL_WORKOUTS_DELETED: &str = "✅ All workouts have been deleted!";
pub const POSITION_UNAVAILABLE: &str =
    "⚠️ Could not get your position. Please enable location services.";
pub const INVALID_RUNNING_INPUT: &str =
    "⚠️ Inputs have to be positive numbers! Please check your values.";
pub const INVALID_CYCLING_INPUT: &str = "⚠️ Distance and duration have to be positive numbers!";

/// Warning shown when the form for `kind` is rejected.
pub fn invalid_input_message(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => INVALID_RUNNING_INPUT,
        WorkoutKind::Cycling => INVALID_CYCLING_INPUT,
    }
}

/// Asks the user yes/no questions and shows them messages.
pub trait Prompter {
    /// Ask for confirmation of a destructive action.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a warning.
    fn warn(&mut self, message: &str);

    /// Show a success notice.
    fn inform(&mut self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Prompter answering from a script and recording what it was shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    default_answer: bool,
    questions: Vec<String>,
    warnings: Vec<String>,
    notices: Vec<String>,
}

impl ScriptedPrompter {
    /// Confirms everything unless scripted otherwise.
    pub fn accepting() -> Self {
        Self {
            default_answer: true,
            ..Default::default()
        }
    }

    /// Declines everything unless scripted otherwise.
    pub fn declining() -> Self {
        Self::default()
    }

    /// Queue the answer for the next confirmation.
    pub fn push_answer(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn inform(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
