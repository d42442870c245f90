// nutrack - terminal client for the nutrition tracking service
//
// Architecture:
// - API client (reqwest): all calls to the backing HTTP service
// - Session store: bearer token in memory, persisted across runs
// - Capture pipeline: camera/file image acquisition for food analysis
// - TUI (ratatui): screens, tabs, forms, charts
// - Event system: spawned network tasks report back over an mpsc channel;
//   the TUI event loop is the only mutator of app state

mod actions;
mod activity;
mod api;
mod capture;
mod chart;
mod cli;
mod config;
mod events;
mod logging;
mod session;
mod theme;
mod tui;

use anyhow::Result;
use api::ApiClient;
use capture::{create_source, CapturePipeline};
use config::Config;
use logging::{LogBuffer, TuiLogLayer};
use session::{SessionStore, TokenStore};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Config subcommands exit before any terminal setup
    if cli::handle_cli() {
        return Ok(());
    }

    Config::ensure_config_exists();
    let config = Config::from_env();

    // Logs go to an in-memory buffer so they never garble the alternate
    // screen; the status bar shows the most recent entry. A rotating JSON
    // file layer can be enabled in config.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let log_buffer = LogBuffer::new();
    let default_filter = format!("nutrack={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must live until exit so buffered file logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Ok(()) => {
                    let appender = tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    );
                    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                    Some(guard)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    tracing::info!("Starting nutrack (API: {})", config.api_url);

    let api = ApiClient::new(&config.api_url)?;
    let session = SessionStore::new(TokenStore::new(config.token_path.clone()));
    let capture = CapturePipeline::new(create_source(config.capture_command.as_deref()));

    // Spawned network tasks report completions here; the event loop applies
    // them between frames.
    let (event_tx, event_rx) = mpsc::channel(256);

    let mut app = tui::app::App::new(api, session, capture, event_tx, log_buffer);
    app.start();

    tui::run_tui(app, event_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
