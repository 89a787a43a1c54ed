//! tasting-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite event log, and serves the JSON API over HTTP.
//!
//! Environment variables prefixed with `TASTING_` override file values; use a
//! double underscore for nested keys, e.g. `TASTING_GEMINI__API_KEY`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use tasting_api::AppState;
use tasting_server::ServerConfig;
use tasting_store_sqlite::SqliteStore;
use tasting_summary::GeminiClient;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Tasting event feedback server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(cli.config)
    .context("failed to load ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let summarizer = GeminiClient::new(server_cfg.gemini.clone())
    .context("failed to build summary client")?;
  if !summarizer.is_configured() {
    tracing::warn!("no Gemini API key configured; summaries will be unavailable");
  }

  let catalog = server_cfg.catalog();
  tracing::info!(
    submitters = catalog.submitters.len(),
    items = catalog.items.len(),
    "loaded catalog"
  );

  let state = AppState {
    store:      Arc::new(store),
    summarizer: Arc::new(summarizer),
    catalog:    Arc::new(catalog),
  };

  let app = tasting_server::app(state);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
