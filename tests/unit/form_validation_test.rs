//! Unit tests for form input validation.

use mapty::ui::form::{FormInput, ValidationError};
use mapty::workouts::{Coordinates, WorkoutKind};

#[test]
fn test_rejects_zero_distance() {
    assert!(matches!(
        FormInput::running("0", "25", "180").validate(),
        Err(ValidationError::NotPositive { field: "distance", .. })
    ));
    assert!(FormInput::cycling("0", "25", "10").validate().is_err());
}

#[test]
fn test_rejects_negative_duration() {
    assert!(matches!(
        FormInput::running("5", "-5", "180").validate(),
        Err(ValidationError::NotPositive { field: "duration", .. })
    ));
}

#[test]
fn test_rejects_non_numeric_cadence() {
    assert!(matches!(
        FormInput::running("5", "25", "one-eighty").validate(),
        Err(ValidationError::NotANumber { field: "cadence", .. })
    ));
}

#[test]
fn test_rejects_zero_cadence() {
    assert!(matches!(
        FormInput::running("5", "25", "0").validate(),
        Err(ValidationError::NotPositive { field: "cadence", .. })
    ));
}

#[test]
fn test_elevation_may_be_zero_or_negative() {
    for elevation in ["0", "-120.5", "830"] {
        let draft = FormInput::cycling("20", "60", elevation).validate().unwrap();
        assert_eq!(draft.kind(), WorkoutKind::Cycling);
    }
}

#[test]
fn test_elevation_must_be_finite() {
    assert!(matches!(
        FormInput::cycling("20", "60", "Infinity").validate(),
        Err(ValidationError::NotANumber { field: "elevation", .. })
    ));
}

#[test]
fn test_whitespace_is_ignored() {
    let draft = FormInput::running(" 5 ", "25\n", " 180").validate().unwrap();
    let run = draft.build(Coordinates::new(10.0, 10.0));
    assert_eq!(run.pace_min_per_km(), Some(5.0));
}

#[test]
fn test_fields_of_other_kind_are_ignored() {
    let mut input = FormInput::running("5", "25", "180");
    input.elevation = "garbage".to_string();
    assert!(input.validate().is_ok());

    let mut input = FormInput::cycling("20", "60", "0");
    input.cadence = "garbage".to_string();
    assert!(input.validate().is_ok());
}
