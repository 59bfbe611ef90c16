//! Integration tests for complete sessions driven through the controller.
//!
//! Covers:
//! - Reloading persisted workouts into a fresh session
//! - Deleting everything after a reload
//! - Keeping markers, list and store in step over many operations
//! - Running without a map when no position is available

use std::time::Duration;

use mapty::map::{FixedPosition, HeadlessMap};
use mapty::storage::{DurableStore, MapSettings, MemoryStore, PersistenceAdapter};
use mapty::ui::form::FormInput;
use mapty::ui::list::MemoryListRenderer;
use mapty::ui::prompt::{ScriptedPrompter, POSITION_UNAVAILABLE};
use mapty::workouts::{SortField, WorkoutId};
use mapty::{Controller, Coordinates, InteractionState, WorkoutContext};

type Session = Controller<HeadlessMap, MemoryListRenderer, ScriptedPrompter, MemoryStore>;

const KEY: &str = "workouts";

fn session(durable: MemoryStore) -> Session {
    Controller::new(
        WorkoutContext::new(),
        PersistenceAdapter::new(durable, KEY),
        HeadlessMap::new(),
        MemoryListRenderer::new(),
        ScriptedPrompter::accepting(),
        MapSettings::default(),
    )
}

/// Start a session over `durable` the way the host does: restore, then locate.
async fn start(durable: MemoryStore) -> Session {
    let mut session = session(durable);
    session.restore();
    session
        .locate(
            &FixedPosition::new(Some(Coordinates::new(0.0, 0.0))),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
    session
}

fn add(session: &mut Session, at: Coordinates, input: FormInput) -> WorkoutId {
    session.on_map_click(at);
    session.form_mut().set_input(input);
    session.submit().unwrap()
}

fn raw_value(session: &Session) -> Option<String> {
    session.persistence().durable().get(KEY).unwrap()
}

fn assert_views_consistent(session: &Session) {
    assert!(session.views_consistent());
    assert!(session.context().markers_match_store());
    assert_eq!(session.map().marker_count(), session.workouts().len());

    let mut listed = session.list().ids();
    let mut stored: Vec<WorkoutId> = session.workouts().iter().map(|w| w.id().clone()).collect();
    listed.sort();
    stored.sort();
    assert_eq!(listed, stored);
}

#[tokio::test]
async fn test_reload_then_delete_all() {
    let mut first = start(MemoryStore::new()).await;
    add(&mut first, Coordinates::new(10.0, 10.0), FormInput::running("5", "25", "180"));
    add(&mut first, Coordinates::new(0.0, 0.0), FormInput::cycling("20", "60", "150"));
    let saved = raw_value(&first).unwrap();
    let before: Vec<_> = first.workouts().to_vec();

    // Simulated reload: a new session over the same durable value
    let mut second = start(MemoryStore::new().with_value(KEY, &saved)).await;
    assert_eq!(second.workouts(), before.as_slice());
    assert_views_consistent(&second);

    assert!(second.delete_all().unwrap());

    let value: serde_json::Value = serde_json::from_str(&raw_value(&second).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!([]));
    assert!(second.context().markers().is_empty());
    assert_eq!(second.map().marker_count(), 0);
    assert!(second.list().entries().is_empty());
}

#[tokio::test]
async fn test_reload_preserves_sorted_order() {
    let mut first = start(MemoryStore::new()).await;
    add(&mut first, Coordinates::new(1.0, 1.0), FormInput::running("3", "18", "170"));
    add(&mut first, Coordinates::new(2.0, 2.0), FormInput::cycling("35", "80", "200"));
    add(&mut first, Coordinates::new(3.0, 3.0), FormInput::running("8", "44", "176"));
    first.sort(SortField::Distance).unwrap();
    let order: Vec<_> = first.workouts().iter().map(|w| w.id().clone()).collect();

    let second = start(MemoryStore::new().with_value(KEY, &raw_value(&first).unwrap())).await;
    let restored: Vec<_> = second.workouts().iter().map(|w| w.id().clone()).collect();

    assert_eq!(restored, order);
    assert_eq!(second.list().ids(), order);
}

#[tokio::test]
async fn test_views_stay_consistent_over_many_operations() {
    let mut session = start(MemoryStore::new()).await;
    let mut live: Vec<WorkoutId> = Vec::new();

    // Deterministic pseudo-random sequence of adds and deletes
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for step in 0..60 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;

        if live.is_empty() || seed % 3 != 0 {
            let at = Coordinates::new((seed % 90) as f64, (step % 180) as f64);
            let distance = format!("{}", 1 + seed % 40);
            let id = if seed % 2 == 0 {
                add(&mut session, at, FormInput::running(&distance, "30", "172"))
            } else {
                add(&mut session, at, FormInput::cycling(&distance, "45", "-3"))
            };
            live.push(id);
        } else {
            let victim = live.remove((seed as usize) % live.len());
            assert!(session.delete(&victim).unwrap());
        }

        if step % 10 == 0 {
            session.sort(SortField::Duration).unwrap();
        }
        assert_views_consistent(&session);
    }

    assert_eq!(session.workouts().len(), live.len());
}

#[tokio::test]
async fn test_deleting_unknown_id_changes_nothing() {
    let mut session = start(MemoryStore::new()).await;
    add(&mut session, Coordinates::new(1.0, 1.0), FormInput::running("5", "25", "180"));
    let before = session.workouts().to_vec();
    let saved = raw_value(&session);

    assert!(!session.delete(&WorkoutId::from("ghost")).unwrap());
    assert!(!session.edit(&WorkoutId::from("ghost")).unwrap());

    assert_eq!(session.workouts(), before.as_slice());
    assert_eq!(raw_value(&session), saved);
    assert_eq!(session.state(), InteractionState::Idle);
}

#[tokio::test]
async fn test_edit_replaces_identity_and_timestamp() {
    let mut session = start(MemoryStore::new()).await;
    let at = Coordinates::new(48.85, 2.35);
    let original = add(&mut session, at, FormInput::running("5", "25", "180"));

    session.edit(&original).unwrap();
    assert!(session.form().is_visible());
    session.form_mut().set_cadence("176");
    let replacement = session.submit().unwrap();

    assert_ne!(replacement, original);
    assert_eq!(session.workouts().len(), 1);
    let run = &session.workouts()[0];
    assert_eq!(run.coords(), at);
    assert_eq!(run.cadence_spm(), Some(176));
    assert_eq!(run.interaction_count(), 0);
    assert!(!raw_value(&session).unwrap().contains(original.as_str()));
    assert_views_consistent(&session);
}

#[tokio::test]
async fn test_session_without_position() {
    let mut first = start(MemoryStore::new()).await;
    add(&mut first, Coordinates::new(1.0, 1.0), FormInput::running("5", "25", "180"));
    let saved = raw_value(&first).unwrap();

    let mut session = session(MemoryStore::new().with_value(KEY, &saved));
    session.restore();
    let result = session
        .locate(&FixedPosition::new(None), Duration::from_millis(50))
        .await;

    assert!(result.is_err());
    assert!(!session.is_map_ready());
    assert_eq!(session.prompter().warnings(), [POSITION_UNAVAILABLE]);
    assert!(session.views_consistent());

    // List and storage keep working
    assert_eq!(session.list().entries().len(), 1);
    let id = session.workouts()[0].id().clone();
    assert!(!session.focus(&id));
    assert!(session.delete(&id).unwrap());
    assert!(session.views_consistent());
    assert_eq!(raw_value(&session).as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_corrupt_value_starts_empty_and_is_overwritten() {
    let mut session = start(MemoryStore::new().with_value(KEY, "{{{ not json")).await;
    assert!(session.workouts().is_empty());

    add(&mut session, Coordinates::new(1.0, 1.0), FormInput::cycling("20", "60", "0"));

    let value: serde_json::Value = serde_json::from_str(&raw_value(&session).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
}
