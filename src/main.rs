//! Mapty - map-based workout log
//!
//! Headless entry point: restores saved workouts, looks up the configured home
//! position and then reads UI events from stdin.

use anyhow::Context;
use mapty::map::{FixedPosition, HeadlessMap};
use mapty::storage::config::load_config;
use mapty::storage::FileStore;
use mapty::{Controller, PersistenceAdapter, WorkoutContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod console;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Mapty v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("failed to load configuration")?;
    tracing::info!("Data directory: {}", config.data_dir.display());

    let persistence = PersistenceAdapter::new(
        FileStore::new(config.storage_dir()),
        config.storage.key.clone(),
    );
    let mut controller = Controller::new(
        WorkoutContext::new(),
        persistence,
        HeadlessMap::new(),
        console::ConsoleListRenderer,
        console::TerminalPrompter,
        config.map.clone(),
    );

    controller.restore();

    // A failed lookup has already been reported; the session goes on without a map
    let provider = FixedPosition::new(config.geolocation.home);
    let _ = controller
        .locate(&provider, config.geolocation.timeout())
        .await;

    console::run(&mut controller)
}
