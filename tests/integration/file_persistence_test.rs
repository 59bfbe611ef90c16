//! Integration tests for workouts kept in files across restarts.

use std::fs;

use tempfile::TempDir;

use mapty::map::HeadlessMap;
use mapty::storage::config::{load_config_from, save_config_to};
use mapty::storage::{AppConfig, FileStore, MapSettings, PersistenceAdapter, DEFAULT_STORAGE_KEY};
use mapty::ui::form::FormInput;
use mapty::ui::list::MemoryListRenderer;
use mapty::ui::prompt::ScriptedPrompter;
use mapty::workouts::{SortField, WorkoutKind};
use mapty::{Controller, Coordinates, WorkoutContext};

type FileSession = Controller<HeadlessMap, MemoryListRenderer, ScriptedPrompter, FileStore>;

fn open(dir: &TempDir) -> FileSession {
    let mut session = Controller::new(
        WorkoutContext::new(),
        PersistenceAdapter::with_default_key(FileStore::new(dir.path())),
        HeadlessMap::new(),
        MemoryListRenderer::new(),
        ScriptedPrompter::accepting(),
        MapSettings::default(),
    );
    session.restore();
    session.initialize_map(Coordinates::new(51.5, -0.12));
    session
}

#[test]
fn test_workouts_survive_restart() {
    let dir = TempDir::new().unwrap();

    let mut first = open(&dir);
    first.on_map_click(Coordinates::new(51.51, -0.1));
    first.form_mut().set_input(FormInput::running("10", "50", "178"));
    let id = first.submit().unwrap();
    drop(first);

    assert!(dir.path().join(format!("{}.json", DEFAULT_STORAGE_KEY)).exists());

    let second = open(&dir);
    assert_eq!(second.workouts().len(), 1);
    assert_eq!(second.workouts()[0].id(), &id);
    assert_eq!(second.workouts()[0].pace_min_per_km(), Some(5.0));
    assert_eq!(second.map().marker_count(), 1);
}

#[test]
fn test_legacy_file_is_read() {
    let dir = TempDir::new().unwrap();
    let legacy = r#"[
        {"type": "running", "id": "1681473600000", "date": "2023-04-14T12:00:00.000Z",
         "coords": [51.5, -0.1], "distance": 5, "duration": 30, "cadence": 172, "clicks": 2},
        {"type": "cycling", "id": "1681473700000", "date": "2023-04-14T12:01:40.000Z",
         "coords": [51.6, -0.2], "distance": 30, "duration": 90, "elevationGain": 320}
    ]"#;
    fs::write(dir.path().join("workouts.json"), legacy).unwrap();

    let mut session = open(&dir);

    let kinds: Vec<WorkoutKind> = session.workouts().iter().map(|w| w.kind()).collect();
    assert_eq!(kinds, [WorkoutKind::Running, WorkoutKind::Cycling]);
    assert_eq!(session.workouts()[0].interaction_count(), 2);
    assert_eq!(session.workouts()[1].speed_km_per_h(), Some(20.0));

    // The next save rewrites the file in the current layout
    session.sort(SortField::Distance).unwrap();
    let rewritten = fs::read_to_string(dir.path().join("workouts.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rewritten).unwrap();
    assert_eq!(value[0]["kind"], "cycling");
    assert_eq!(value[1]["kind"], "running");
}

#[test]
fn test_reset_removes_file() {
    let dir = TempDir::new().unwrap();

    let mut session = open(&dir);
    session.on_map_click(Coordinates::new(51.51, -0.1));
    session.form_mut().set_input(FormInput::cycling("12", "40", "80"));
    session.submit().unwrap();

    session.reset().unwrap();

    assert!(!dir.path().join("workouts.json").exists());
    assert!(session.workouts().is_empty());
    assert_eq!(session.map().marker_count(), 0);
    assert!(open(&dir).workouts().is_empty());
}

#[test]
fn test_config_points_storage_at_data_dir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.map.zoom_level = 15;
    config.geolocation.home = Some(Coordinates::new(38.72, -9.14));
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.map.zoom_level, 15);
    assert_eq!(loaded.geolocation.home, Some(Coordinates::new(38.72, -9.14)));
    assert_eq!(loaded.storage_dir(), dir.path().join("storage"));
}
