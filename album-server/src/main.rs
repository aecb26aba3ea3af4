//! album-server - photo date server entry point
//!
//! Serves the photo directory and the album client over HTTP, lists photos
//! with resolved dates and stores manual date corrections.

use std::path::PathBuf;

use album_common::config::{ConfigOverrides, FileTimePreference, ServerConfig, DEFAULT_CONFIG_FILE};
use album_server::{build_router, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for album-server
#[derive(Parser, Debug)]
#[command(name = "album-server")]
#[command(about = "Serves a photo directory with resolved dates and date corrections")]
#[command(version)]
struct Args {
    /// TOML config file (default: ./album.toml if present)
    #[arg(short, long, env = "ALBUM_CONFIG")]
    config: Option<PathBuf>,

    /// Host to listen on
    #[arg(long, env = "ALBUM_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "ALBUM_PORT")]
    port: Option<u16>,

    /// Flat directory containing the photos
    #[arg(long, env = "ALBUM_PHOTO_DIR")]
    photo_dir: Option<PathBuf>,

    /// JSON file holding manual date corrections
    #[arg(long, env = "ALBUM_DATES_FILE")]
    dates_file: Option<PathBuf>,

    /// Root directory for static file serving
    #[arg(long, env = "ALBUM_STATIC_ROOT")]
    static_root: Option<PathBuf>,

    /// Accepted image extensions, comma separated (e.g. png,jpg,jpeg,gif)
    #[arg(long, env = "ALBUM_EXTENSIONS", value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// Filesystem fallback date: "created" (then modified) or "modified"
    #[arg(long, env = "ALBUM_FILE_TIME")]
    file_time: Option<FileTimePreference>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ALBUM_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            photo_dir: self.photo_dir.clone(),
            dates_file: self.dates_file.clone(),
            static_root: self.static_root.clone(),
            extensions: self.extensions.clone(),
            file_time: self.file_time,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Configuration comes first so the log level from TOML applies
    let config_file = args.config.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.is_file().then_some(default)
    });
    let mut config = match &config_file {
        Some(path) => ServerConfig::load(Some(path.as_path()))?,
        None => ServerConfig::default(),
    };
    config.apply(args.overrides())?;

    let level = config.logging.level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "album_server={level},album_common={level},tower_http={level}",
                    level = level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting album-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_file {
        Some(path) => info!("Configuration file: {}", path.display()),
        None => warn!(
            "No {} found in working directory, using built-in defaults",
            DEFAULT_CONFIG_FILE
        ),
    }
    info!("Photo directory: {}", config.photo_dir.display());
    info!("Dates file: {}", config.dates_file.display());
    info!("Static root: {}", config.static_root.display());
    info!("Image extensions: {}", config.extensions.join(", "));
    info!("Filesystem date fallback: {:?}", config.file_time);

    if !config.photo_dir.is_dir() {
        warn!(
            "Photo directory {} does not exist; /photos-list will fail until it is created",
            config.photo_dir.display()
        );
    }

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let local_addr = listener.local_addr()?;

    let app = build_router(AppState::new(config));

    info!("Serving at http://{}", local_addr);
    info!("Health check: http://{}/health", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
