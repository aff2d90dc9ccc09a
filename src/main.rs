/*****************************************************************************************
 *
 *  flatfile-api – visits and data items over HTTP, stored in flat JSON files
 *  -------------------------------------------------------------------------
 *
 *  Every request re-reads the backing file; every mutation rewrites all of it.
 *
 *****************************************************************************************/

mod app;
mod config;
mod errors;
mod persistence;
mod routes;
mod services;
mod state;

use std::path::PathBuf;

use axum::serve;
use tokio::net::TcpListener;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;
use crate::state::app::AppState;

/// Env var naming an explicit config file; overrides the lookup next to the executable.
const CONFIG_ENV: &str = "FLATFILE_CONFIG";

#[tokio::main]
async fn main() {
    //
    // ────────────────────────────────────────────────────────
    //  Locate and load config.json
    // ────────────────────────────────────────────────────────
    //
    let config_path = locate_config();
    let cfg = match AppConfig::load_from_file(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e} ({})", config_path.display());
            std::process::exit(1);
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let level = match cfg.log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    tracing::info!("Loaded config.json from {}", config_path.display());
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Open collections and build the Axum app
    // ────────────────────────────────────────────────────────
    //
    let state = AppState::from_config(&cfg);

    for (name, path) in [
        (state.visits.name(), state.visits.path()),
        (state.data.name(), state.data.path()),
    ] {
        if !path.exists() {
            tracing::warn!(
                "{} file {} does not exist; requests will fail until it is created",
                name,
                path.display()
            );
        }
    }

    let app = app::build_app(state);

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Server running on http://localhost:{}", cfg.port);

    serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
        .expect("Server error");
}

/// `$FLATFILE_CONFIG`, else config.json in the executable's folder, else one level up.
fn locate_config() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    let exe_path = std::env::current_exe().expect("Cannot get executable path");
    let exe_dir = exe_path.parent().expect("Cannot get executable directory");

    let beside = exe_dir.join("config.json");
    if beside.exists() {
        return beside;
    }

    let fallback = exe_dir.join("..").join("config.json");
    if fallback.exists() {
        return fallback;
    }

    eprintln!(
        "config.json not found in:\n  {}\n  {}\nCopy config.json to one of these paths or set {}.",
        beside.display(),
        fallback.display(),
        CONFIG_ENV
    );
    std::process::exit(1);
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");

    tracing::warn!("CTRL+C received, shutting down");
}
