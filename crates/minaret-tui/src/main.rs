mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod http;
mod poller;
mod theme;
mod widgets;

use minaret_proto::config::Config;
use minaret_proto::directory::{DirectoryClient, DirectorySnapshot};
use minaret_proto::state::StateFile;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use crate::action::Action;
use crate::app::{App, AppMessage, Publishers};
use crate::app_state::AppState;
use crate::theme::ThemeStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Load config ──────────────────────────────────────────────────────────
    // Loaded before logging because it names the log file; a failure is
    // reported once the subscriber is up.
    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let log_path = config.paths.log_file.clone();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("minaret log: {}", log_path.display());

    info!("minaret starting…");
    if let Some(e) = config_err {
        warn!("config unreadable, using defaults: {}", e);
    }

    // ── Session: volume from the last run, selection always idle ─────────────
    let state_file = StateFile::new(config.paths.state_file.clone());
    let store = state_file.load(config.player.default_volume).restore();
    info!(
        "restored volume {:.2} from {}",
        store.session().volume(),
        state_file.path().display()
    );

    let client = DirectoryClient::new(config.api.base_url.clone(), config.request_timeout())?;
    info!("station directory: {}", client.base_url());

    let mut state = AppState::new(
        store,
        ThemeStore::new(config.ui.theme),
        config.api.base_url.clone(),
    );

    // ── Channels ─────────────────────────────────────────────────────────────
    let (tx, rx) = mpsc::channel::<AppMessage>(1024);
    let (control_tx, control_rx) = mpsc::channel::<Action>(64);
    let (session_tx, session_rx) = watch::channel(state.session().clone());
    let (directory_tx, directory_rx) = watch::channel(DirectorySnapshot::default());

    // ── HTTP server ──────────────────────────────────────────────────────────
    if config.http.enabled {
        let addr = format!("{}:{}", config.http.bind_address, config.http.port);
        state.control_addr = Some(addr);
        http::start_server(
            config.http.bind_address.clone(),
            config.http.port,
            http::HttpState {
                session_rx,
                directory_rx,
                action_tx: control_tx,
            },
        );
    }

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = App::new(
        state,
        config,
        client,
        state_file,
        tx,
        Publishers {
            session_tx,
            directory_tx,
        },
    );
    app.run(rx, control_rx).await
}
