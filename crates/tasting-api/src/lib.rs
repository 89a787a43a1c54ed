//! JSON REST API for the tasting log.
//!
//! Exposes an axum [`Router`] backed by any
//! [`tasting_core::store::EventLogStore`] and
//! [`tasting_core::summary::SummaryGenerator`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tasting_api::api_router(state))
//! ```

pub mod dashboard;
pub mod error;
pub mod submissions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tasting_core::{
  catalog::Catalog,
  store::EventLogStore,
  summary::SummaryGenerator,
};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. Built once at start-up.
pub struct AppState<S, G> {
  pub store:      Arc<S>,
  pub summarizer: Arc<G>,
  pub catalog:    Arc<Catalog>,
}

// Manual impl: only the `Arc`s are cloned, so `S` and `G` need not be `Clone`.
impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:      self.store.clone(),
      summarizer: self.summarizer.clone(),
      catalog:    self.catalog.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(state: AppState<S, G>) -> Router<()>
where
  S: EventLogStore + 'static,
  G: SummaryGenerator + 'static,
{
  Router::new()
    // Write side
    .route("/catalog", get(submissions::catalog::<S, G>))
    .route("/submissions", post(submissions::create::<S, G>))
    .route("/entries", get(submissions::list::<S, G>))
    // Read side
    .route("/dashboard", get(dashboard::dashboard::<S, G>))
    .route("/items/{item}/pairs", get(dashboard::pairs::<S, G>))
    .route("/items/{item}/notes", get(dashboard::notes::<S, G>))
    .route("/items/{item}/summary", post(dashboard::summary::<S, G>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{future::Future, sync::Mutex};

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tasting_core::fact::{Entry, SheetRow};
  use tasting_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  /// Echoes the prompt back so tests can inspect it.
  struct EchoSummarizer;

  impl SummaryGenerator for EchoSummarizer {
    fn generate<'a>(
      &'a self,
      prompt: &'a str,
    ) -> impl Future<Output = String> + Send + 'a {
      async move { format!("echo: {prompt}") }
    }
  }

  /// A store whose backend is always down.
  struct DownStore;

  #[derive(Debug, thiserror::Error)]
  #[error("connection refused")]
  struct Down;

  impl EventLogStore for DownStore {
    type Error = Down;
    async fn append(&self, _: SheetRow) -> Result<Entry, Down> { Err(Down) }
    async fn append_all(&self, _: Vec<SheetRow>) -> Result<Vec<Entry>, Down> { Err(Down) }
    async fn fetch_all(&self) -> Result<Vec<Entry>, Down> { Err(Down) }
  }

  /// Records how many rows were handed to it, then fails.
  #[derive(Default)]
  struct CountingStore {
    appended: Mutex<usize>,
  }

  impl EventLogStore for CountingStore {
    type Error = Down;
    async fn append(&self, _: SheetRow) -> Result<Entry, Down> {
      *self.appended.lock().unwrap() += 1;
      Err(Down)
    }
    async fn append_all(&self, rows: Vec<SheetRow>) -> Result<Vec<Entry>, Down> {
      *self.appended.lock().unwrap() += rows.len();
      Err(Down)
    }
    async fn fetch_all(&self) -> Result<Vec<Entry>, Down> { Ok(Vec::new()) }
  }

  fn catalog() -> Catalog {
    Catalog {
      items: vec!["Riesling".into(), "Cremant".into()],
      ..Catalog::default()
    }
  }

  async fn sqlite_state() -> AppState<SqliteStore, EchoSummarizer> {
    AppState {
      store:      Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      summarizer: Arc::new(EchoSummarizer),
      catalog:    Arc::new(catalog()),
    }
  }

  async fn call<S, G>(
    state: AppState<S, G>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value)
  where
    S: EventLogStore + 'static,
    G: SummaryGenerator + 'static,
  {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(state)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  fn beth() -> Value {
    json!({
      "name": "Beth",
      "item": "Riesling",
      "rating": 6,
      "price": 15,
      "notes": ["Lemon", "Lime"]
    })
  }

  // ── Submissions ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submission_appends_all_rows() {
    let state = sqlite_state().await;
    let (status, body) =
      call(state.clone(), "POST", "/submissions", Some(beth())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, body) = call(state, "GET", "/entries", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["category"], "Rating");
    assert_eq!(entries[0]["value"], "6");
    assert_eq!(entries[3]["taste"], "Lime");
  }

  #[tokio::test]
  async fn blank_name_is_rejected_without_writing() {
    let store = Arc::new(CountingStore::default());
    let state = AppState {
      store:      store.clone(),
      summarizer: Arc::new(EchoSummarizer),
      catalog:    Arc::new(catalog()),
    };
    let mut body = beth();
    body["name"] = json!("   ");

    let (status, json) = call(state, "POST", "/submissions", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please enter a valid name before submitting.");
    assert_eq!(*store.appended.lock().unwrap(), 0);
  }

  #[tokio::test]
  async fn unknown_item_is_rejected() {
    let mut body = beth();
    body["item"] = json!("Merlot");
    let (status, _) =
      call(sqlite_state().await, "POST", "/submissions", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn item_spelling_follows_catalog() {
    let state = sqlite_state().await;
    call(state.clone(), "POST", "/submissions", Some(beth())).await;
    let mut aleks = beth();
    aleks["name"] = json!("Aleks");
    aleks["item"] = json!(" riesling ");
    aleks["rating"] = json!(8);
    let (status, body) =
      call(state.clone(), "POST", "/submissions", Some(aleks)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body[0]["item"], "Riesling");

    let (_, view) = call(state, "GET", "/dashboard", None).await;
    assert_eq!(view["items"], json!(["Riesling"]));
    assert_eq!(view["summaries"][0]["average_rating"], 7.0);
    assert_eq!(view["pairs"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn catalog_is_served() {
    let (status, body) = call(sqlite_state().await, "GET", "/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!(["Riesling", "Cremant"]));
    assert_eq!(body["palette"].as_array().unwrap().len(), 5);
  }

  // ── Read side ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn riesling_end_to_end() {
    let state = sqlite_state().await;
    call(state.clone(), "POST", "/submissions", Some(beth())).await;

    let (status, view) =
      call(state.clone(), "GET", "/dashboard?item=Riesling", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      view["summaries"],
      json!([{ "item": "Riesling", "average_rating": 6.0, "average_price": 15.0 }])
    );
    assert_eq!(
      view["pairs"],
      json!([{ "submitter": "Beth", "item": "Riesling", "rating": 6.0, "price": 15.0 }])
    );
    assert_eq!(view["focus"]["notes"], json!({ "Lemon": 1, "Lime": 1 }));

    let (_, pairs) = call(state.clone(), "GET", "/items/Riesling/pairs", None).await;
    assert_eq!(pairs.as_array().unwrap().len(), 1);

    let (_, notes) = call(state, "GET", "/items/Riesling/notes", None).await;
    assert_eq!(notes, json!({ "Lemon": 1, "Lime": 1 }));
  }

  #[tokio::test]
  async fn resubmission_overrides_rating_but_adds_notes() {
    let state = sqlite_state().await;
    call(state.clone(), "POST", "/submissions", Some(beth())).await;
    let mut again = beth();
    again["rating"] = json!(9);
    again["notes"] = json!(["lemon "]);
    call(state.clone(), "POST", "/submissions", Some(again)).await;

    let (_, view) = call(state, "GET", "/dashboard", None).await;
    assert_eq!(view["summaries"][0]["average_rating"], 9.0);
    assert_eq!(view["focus"]["notes"], json!({ "Lemon": 2, "Lime": 1 }));
  }

  #[tokio::test]
  async fn empty_log_dashboard_has_no_focus() {
    let (status, view) = call(sqlite_state().await, "GET", "/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["items"], json!([]));
    assert_eq!(view["focus"], Value::Null);
  }

  #[tokio::test]
  async fn item_without_notes_returns_empty_map() {
    let (status, notes) =
      call(sqlite_state().await, "GET", "/items/Cremant/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notes, json!({}));
  }

  #[tokio::test]
  async fn summary_uses_generator_output() {
    let state = sqlite_state().await;
    call(state.clone(), "POST", "/submissions", Some(beth())).await;
    let (status, body) =
      call(state, "POST", "/items/Riesling/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"], "Riesling");
    let text = body["summary"].as_str().unwrap();
    assert!(text.starts_with("echo: "), "{text}");
    assert!(text.contains("Average rating: 6.00"), "{text}");
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn store_failure_is_503() {
    let state = AppState {
      store:      Arc::new(DownStore),
      summarizer: Arc::new(EchoSummarizer),
      catalog:    Arc::new(catalog()),
    };
    let (status, body) = call(state.clone(), "GET", "/dashboard", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "store unavailable: connection refused");

    let (status, _) = call(state, "POST", "/submissions", Some(beth())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
  }
}
