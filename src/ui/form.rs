//! New-workout form: raw field values, visibility and validation.

use thiserror::Error;

use crate::workouts::{Coordinates, Workout, WorkoutKind};

/// Raw form field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormInput {
    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: String::new(),
        }
    }

    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            kind: WorkoutKind::Cycling,
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: elevation.to_string(),
        }
    }

    /// Check the fields and turn them into typed values.
    ///
    /// Distance and duration must be finite and positive. Cadence must be a
    /// finite positive whole number; elevation gain only has to be finite.
    /// Blank fields read as zero.
    pub fn validate(&self) -> Result<WorkoutDraft, ValidationError> {
        let distance_km = parse_number("distance", &self.distance)?;
        let duration_min = parse_number("duration", &self.duration)?;

        let extra = match self.kind {
            WorkoutKind::Running => {
                let cadence = parse_number("cadence", &self.cadence)?;
                require_positive("distance", distance_km)?;
                require_positive("duration", duration_min)?;
                require_positive("cadence", cadence)?;
                if cadence.fract() != 0.0 || cadence > f64::from(u32::MAX) {
                    return Err(ValidationError::InvalidCadence(cadence));
                }
                DraftExtra::Cadence(cadence as u32)
            }
            WorkoutKind::Cycling => {
                let elevation = parse_number("elevation", &self.elevation)?;
                require_positive("distance", distance_km)?;
                require_positive("duration", duration_min)?;
                DraftExtra::Elevation(elevation)
            }
        };

        Ok(WorkoutDraft {
            distance_km,
            duration_min,
            extra,
        })
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        }),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DraftExtra {
    Cadence(u32),
    Elevation(f64),
}

/// Validated form values, waiting for a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutDraft {
    distance_km: f64,
    duration_min: f64,
    extra: DraftExtra,
}

impl WorkoutDraft {
    pub fn kind(&self) -> WorkoutKind {
        match self.extra {
            DraftExtra::Cadence(_) => WorkoutKind::Running,
            DraftExtra::Elevation(_) => WorkoutKind::Cycling,
        }
    }

    /// Create the workout at `coords`.
    pub fn build(self, coords: Coordinates) -> Workout {
        match self.extra {
            DraftExtra::Cadence(cadence) => {
                Workout::running(coords, self.distance_km, self.duration_min, cadence)
            }
            DraftExtra::Elevation(elevation) => {
                Workout::cycling(coords, self.distance_km, self.duration_min, elevation)
            }
        }
    }
}

/// Form validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("cadence must be a whole number of steps per minute, got {0}")]
    InvalidCadence(f64),
}

/// Form visibility and contents.
#[derive(Debug, Clone, Default)]
pub struct WorkoutForm {
    visible: bool,
    input: FormInput,
}

impl WorkoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Replace every field at once.
    pub fn set_input(&mut self, input: FormInput) {
        self.input = input;
    }

    pub fn set_distance(&mut self, value: &str) {
        self.input.distance = value.to_string();
    }

    pub fn set_duration(&mut self, value: &str) {
        self.input.duration = value.to_string();
    }

    pub fn set_cadence(&mut self, value: &str) {
        self.input.cadence = value.to_string();
    }

    pub fn set_elevation(&mut self, value: &str) {
        self.input.elevation = value.to_string();
    }

    /// Switch kinds, which swaps the cadence row for the elevation row.
    pub fn set_kind(&mut self, kind: WorkoutKind) {
        self.input.kind = kind;
    }

    /// Kind whose specific row is visible.
    pub fn visible_row(&self) -> WorkoutKind {
        self.input.kind
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the form and clear every numeric field. The kind is kept.
    pub fn hide(&mut self) {
        self.visible = false;
        self.input = FormInput {
            kind: self.input.kind,
            ..Default::default()
        };
    }

    /// Show the form prefilled from `workout`.
    pub fn load(&mut self, workout: &Workout) {
        let mut input = FormInput {
            kind: workout.kind(),
            distance: workout.distance_km().to_string(),
            duration: workout.duration_min().to_string(),
            ..Default::default()
        };
        if let Some(cadence) = workout.cadence_spm() {
            input.cadence = cadence.to_string();
        }
        if let Some(elevation) = workout.elevation_gain_m() {
            input.elevation = elevation.to_string();
        }

        self.input = input;
        self.visible = true;
    }
}
