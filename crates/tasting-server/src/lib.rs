//! HTTP server wiring for the tasting log.
//!
//! Owns configuration and router assembly; the binary in `main.rs` only
//! parses arguments, opens the store and serves.

use std::path::PathBuf;

use axum::{Router, routing::get};
use serde::Deserialize;
use tasting_api::{AppState, api_router};
use tasting_core::{
  catalog::{Catalog, NoteGroup},
  store::EventLogStore,
  summary::SummaryGenerator,
};
use tasting_summary::GeminiConfig;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered with
/// `TASTING_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default)]
  pub catalog:    CatalogOverrides,
  #[serde(default)]
  pub gemini:     GeminiConfig,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8501 }
fn default_store_path() -> PathBuf { PathBuf::from("tasting.sqlite") }

/// Replace parts of the built-in [`Catalog`]. Unset lists keep the default.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogOverrides {
  pub submitters: Option<Vec<String>>,
  pub items:      Option<Vec<String>>,
  pub palette:    Option<Vec<NoteGroup>>,
}

impl CatalogOverrides {
  pub fn apply(&self, mut base: Catalog) -> Catalog {
    if let Some(s) = &self.submitters {
      base.submitters = s.clone();
    }
    if let Some(i) = &self.items {
      base.items = i.clone();
    }
    if let Some(p) = &self.palette {
      base.palette = p.clone();
    }
    base
  }
}

impl ServerConfig {
  /// Load from an optional TOML file plus the environment.
  ///
  /// Nested keys use a double underscore, e.g. `TASTING_GEMINI__API_KEY`.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path.into()).required(false))
      .add_source(
        config::Environment::with_prefix("TASTING")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn catalog(&self) -> Catalog { self.catalog.apply(Catalog::default()) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api`, a liveness probe, and
/// request tracing.
pub fn app<S, G>(state: AppState<S, G>) -> Router
where
  S: EventLogStore + 'static,
  G: SummaryGenerator + 'static,
{
  Router::new()
    .route("/healthz", get(|| async { "ok" }))
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use std::{future::Future, sync::Arc};

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tasting_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  fn from_toml(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "127.0.0.1:8501");
    assert_eq!(cfg.store_path, PathBuf::from("tasting.sqlite"));
    assert_eq!(cfg.catalog(), Catalog::default());
    assert!(cfg.gemini.api_key.is_none());
  }

  #[test]
  fn catalog_overrides_replace_only_given_lists() {
    let cfg = from_toml(
      r#"
      port = 9000

      [catalog]
      items = ["Riesling", "Pinot Gris"]

      [gemini]
      api_key = "k"
      model = "gemini-pro"
      "#,
    );
    let catalog = cfg.catalog();
    assert_eq!(cfg.port, 9000);
    assert_eq!(catalog.items, ["Riesling", "Pinot Gris"]);
    assert_eq!(catalog.submitters, Catalog::default().submitters);
    assert_eq!(cfg.gemini.model, "gemini-pro");
    assert_eq!(cfg.gemini.api_key.as_deref(), Some("k"));
  }

  #[test]
  fn missing_config_file_is_not_an_error() {
    let cfg = ServerConfig::load("/nonexistent/tasting/config.toml").unwrap();
    assert!(!cfg.host.is_empty());
  }

  struct Silent;

  impl SummaryGenerator for Silent {
    fn generate<'a>(
      &'a self,
      _prompt: &'a str,
    ) -> impl Future<Output = String> + Send + 'a {
      async { String::new() }
    }
  }

  #[tokio::test]
  async fn api_is_nested_and_healthz_answers() {
    let state = AppState {
      store:      Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      summarizer: Arc::new(Silent),
      catalog:    Arc::new(Catalog::default()),
    };

    let resp = app(state.clone())
      .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app(state)
      .oneshot(Request::get("/api/dashboard").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let view: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(view["items"], serde_json::json!([]));
  }
}
