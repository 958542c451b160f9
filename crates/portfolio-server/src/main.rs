//! Portfolio server entry point.
//!
//! Serves the portfolio document as JSON and accepts edits from the admin
//! panel, persisting them to a JSON file.
//!
//! # Usage
//!
//! ```text
//! portfolio-server [OPTIONS]
//!
//! Options:
//!   --settings <FILE>         TOML settings file
//!   --bind <ADDR>             IP address to bind to [default: 0.0.0.0]
//!   --port <PORT>             TCP port [default: 3000]
//!   --data-file <FILE>        JSON file holding the document [default: portfolio-data.json]
//!   --admin-secret <SECRET>   Shared secret required on writes
//!   --max-body-bytes <BYTES>  Largest accepted request body [default: 1048576]
//!   --in-memory               Keep the document in memory only
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Description                         |
//! |--------------------------|-------------------------------------|
//! | `PORTFOLIO_SETTINGS`     | Same as `--settings`                |
//! | `PORTFOLIO_ADMIN_SECRET` | Same as `--admin-secret`            |
//! | `RUST_LOG`               | Log filter, e.g. `debug` [default: `info`] |
//!
//! Command-line flags take precedence over the settings file, which takes
//! precedence over the built-in defaults.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use portfolio_server::application::ConfigService;
use portfolio_server::domain::ServerSettings;
use portfolio_server::infrastructure::{ConfigStore, FileConfigStore, HttpServer, InMemoryConfigStore};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Portfolio content server.
#[derive(Debug, Parser)]
#[command(
    name = "portfolio-server",
    about = "Serves and stores the portfolio site's content document",
    version
)]
struct Cli {
    /// TOML settings file.  Flags given on the command line override it.
    #[arg(long, env = "PORTFOLIO_SETTINGS")]
    settings: Option<PathBuf>,

    /// IP address to bind to.
    #[arg(long)]
    bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// JSON file holding the portfolio document.
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Shared secret required in the `x-admin-password` header on writes.
    #[arg(long, env = "PORTFOLIO_ADMIN_SECRET", hide_env_values = true)]
    admin_secret: Option<String>,

    /// Largest request body accepted, in bytes.
    #[arg(long)]
    max_body_bytes: Option<usize>,

    /// Keep the document in memory instead of in `--data-file`.
    #[arg(long)]
    in_memory: bool,
}

impl Cli {
    /// Builds the effective settings: the settings file (or defaults), then
    /// every flag that was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed.
    fn into_settings(self) -> anyhow::Result<ServerSettings> {
        let mut settings = match &self.settings {
            Some(path) => ServerSettings::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => ServerSettings::default(),
        };

        if let Some(bind) = self.bind {
            settings.bind_address = bind;
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(data_file) = self.data_file {
            settings.data_file = data_file;
        }
        if let Some(secret) = self.admin_secret {
            settings.admin_secret = Some(secret);
        }
        if let Some(limit) = self.max_body_bytes {
            settings.max_body_bytes = limit;
        }
        Ok(settings)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let in_memory = cli.in_memory;
    let settings = cli.into_settings()?;

    let addr = settings.socket_addr()?;
    let admin_secret = settings.admin_secret()?.to_string();
    if settings.uses_legacy_secret() {
        warn!(
            "no admin secret configured; accepting the legacy secret, which is publicly \
             visible in the admin page. Set --admin-secret or PORTFOLIO_ADMIN_SECRET."
        );
    }

    let store: Arc<dyn ConfigStore> = if in_memory {
        info!("document is kept in memory only; edits are lost on exit");
        Arc::new(InMemoryConfigStore::new())
    } else {
        info!("document file: {}", settings.data_file.display());
        Arc::new(FileConfigStore::new(settings.data_file.clone()))
    };

    let service = Arc::new(ConfigService::new(store, admin_secret));
    let server = HttpServer::bind(addr, settings.max_body_bytes).await?;

    // ── Graceful shutdown flag ─────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, shutting down");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    server.run(service, running).await?;

    info!("portfolio server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
