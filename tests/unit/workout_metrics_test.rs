//! Unit tests for derived workout metrics.

use mapty::workouts::{Coordinates, Workout, WorkoutKind};

const DISTANCES: [f64; 6] = [0.1, 1.0, 3.7, 5.0, 21.0975, 160.0];
const DURATIONS: [f64; 5] = [0.5, 12.0, 25.0, 60.0, 317.25];

#[test]
fn test_running_pace_is_duration_over_distance() {
    for distance in DISTANCES {
        for duration in DURATIONS {
            let run = Workout::running(Coordinates::new(0.0, 0.0), distance, duration, 170);
            assert_eq!(run.pace_min_per_km(), Some(duration / distance));
            assert_eq!(run.speed_km_per_h(), None);
        }
    }
}

#[test]
fn test_cycling_speed_is_distance_per_hour() {
    for distance in DISTANCES {
        for duration in DURATIONS {
            let ride = Workout::cycling(Coordinates::new(0.0, 0.0), distance, duration, 0.0);
            assert_eq!(ride.speed_km_per_h(), Some(distance / (duration / 60.0)));
            assert_eq!(ride.pace_min_per_km(), None);
        }
    }
}

#[test]
fn test_scenario_run_at_ten_ten() {
    let run = Workout::running(Coordinates::new(10.0, 10.0), 5.0, 25.0, 180);

    assert_eq!(run.kind(), WorkoutKind::Running);
    assert_eq!(run.pace_min_per_km(), Some(5.0));

    let local = run.created_at().with_timezone(&chrono::Local);
    let month = local.format("%B").to_string();
    let day = local.format("%-d").to_string();
    assert!(run.describe().starts_with("Running on "));
    assert!(run.describe().contains(&month));
    assert!(run.describe().ends_with(&day));
}

#[test]
fn test_scenario_ride_at_origin() {
    let ride = Workout::cycling(Coordinates::new(0.0, 0.0), 20.0, 60.0, 150.0);

    assert_eq!(ride.kind(), WorkoutKind::Cycling);
    assert_eq!(ride.speed_km_per_h(), Some(20.0));
    assert!(ride.describe().starts_with("Cycling on "));
}

#[test]
fn test_interaction_counter_starts_at_zero() {
    let mut ride = Workout::cycling(Coordinates::new(0.0, 0.0), 20.0, 60.0, 150.0);
    assert_eq!(ride.interaction_count(), 0);

    ride.click();
    assert_eq!(ride.interaction_count(), 1);
    assert_eq!(ride.speed_km_per_h(), Some(20.0));
}
