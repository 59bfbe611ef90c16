//! Unit tests for workout store ordering and removal.

use mapty::workouts::{
    Coordinates, SortDirection, SortField, Workout, WorkoutId, WorkoutStore,
};

fn mixed_store() -> WorkoutStore {
    let mut store = WorkoutStore::new();
    store.add(Workout::running(Coordinates::new(0.0, 0.0), 5.0, 25.0, 180));
    store.add(Workout::cycling(Coordinates::new(1.0, 1.0), 42.0, 95.0, 410.0));
    store.add(Workout::running(Coordinates::new(2.0, 2.0), 10.0, 52.0, 172));
    store.add(Workout::cycling(Coordinates::new(3.0, 3.0), 5.0, 14.0, -8.0));
    store.add(Workout::running(Coordinates::new(4.0, 4.0), 1.5, 9.0, 165));
    store
}

fn ids(store: &WorkoutStore) -> Vec<WorkoutId> {
    store.ids().cloned().collect()
}

#[test]
fn test_sort_by_distance_twice_is_idempotent() {
    let mut store = mixed_store();

    store.sort_by(SortField::Distance, SortDirection::default());
    let first = ids(&store);
    store.sort_by(SortField::Distance, SortDirection::default());

    assert_eq!(ids(&store), first);
}

#[test]
fn test_sort_by_duration_orders_descending() {
    let mut store = mixed_store();
    store.sort_by(SortField::Duration, SortDirection::Descending);

    let durations: Vec<f64> = store.all().iter().map(Workout::duration_min).collect();
    assert_eq!(durations, vec![95.0, 52.0, 25.0, 14.0, 9.0]);
}

#[test]
fn test_sort_keeps_ties_in_previous_order() {
    let mut store = mixed_store();
    let before = ids(&store);

    store.sort_by(SortField::Distance, SortDirection::Descending);

    // Both 5 km workouts keep their relative order
    let positions: Vec<usize> = [&before[0], &before[3]]
        .iter()
        .map(|id| ids(&store).iter().position(|x| x == *id).unwrap())
        .collect();
    assert!(positions[0] < positions[1]);
}

#[test]
fn test_removing_unknown_id_changes_nothing() {
    let mut store = mixed_store();
    let before = ids(&store);

    assert!(store.remove(&WorkoutId::from("does-not-exist")).is_none());

    assert_eq!(store.len(), 5);
    assert_eq!(ids(&store), before);
}

#[test]
fn test_find_mut_updates_in_place() {
    let mut store = mixed_store();
    let id = ids(&store)[2].clone();

    store.find_mut(&id).unwrap().click();

    assert_eq!(store.find(&id).unwrap().interaction_count(), 1);
}
