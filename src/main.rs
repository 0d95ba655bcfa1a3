mod services;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ishara", about = "Arabic sign-language learning toolkit")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, origin) = ishara_core::AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;

    let log_buffer: ishara_tui::LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
    let tui_log_layer = ishara_tui::TuiLogLayer::new(Arc::clone(&log_buffer), 1000);

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tui_log_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!("ishara starting");
    if origin == ishara_core::ConfigOrigin::Defaults {
        tracing::info!("config file {:?} not found, using defaults", cli.config);
    }

    let vocab = ishara_lexicon::Vocabulary::builtin()
        .context("built-in vocabulary is malformed")?
        .with_extra(&config.vocabulary.extra);
    tracing::info!("vocabulary ready with {} entries", vocab.len());

    let store = services::open_store(&config);
    let pose_registry = ishara_engine::PoseRegistry::new();
    tracing::debug!("pose estimators: {:?}", pose_registry.list_estimators());
    let pose = ishara_engine::PoseCapability::load(config.pose.as_ref(), &pose_registry).await;

    let services = services::Services::new(config, Arc::new(vocab), store, pose);

    let (state_tx, state_rx) = tokio::sync::watch::channel(ishara_core::AppState::default());
    let (cmd_tx, cmd_rx) = tokio::sync::mpsc::unbounded_channel::<ishara_core::UiCommand>();

    let services_task = tokio::spawn(services.run(cmd_rx, state_tx));

    tracing::info!("TUI active, press Esc to quit");

    let ui_result = ishara_tui::run(state_rx, cmd_tx, log_buffer).await;

    tracing::info!("shutting down");
    if let Err(e) = services_task.await {
        tracing::warn!("services task ended abnormally: {e}");
    }

    ui_result.context("TUI error")
}
