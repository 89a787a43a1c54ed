//! Handlers for the write side and the raw log.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/catalog` | Form options |
//! | `POST` | `/submissions` | Body: [`Submission`]; returns 201 + appended entries |
//! | `GET`  | `/entries` | Every entry in append order |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tasting_core::{
  catalog::Catalog,
  fact::Entry,
  store::EventLogStore,
  submission::Submission,
  summary::SummaryGenerator,
};

use crate::{AppState, error::ApiError};

/// `GET /catalog`
pub async fn catalog<S, G>(State(state): State<AppState<S, G>>) -> Json<Catalog>
where
  S: EventLogStore,
  G: SummaryGenerator,
{
  Json(state.catalog.as_ref().clone())
}

/// `POST /submissions`: validates, then appends every row in one batch.
///
/// A blank name is rejected before anything touches the store. Items are
/// stored under the catalog's spelling.
pub async fn create<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<Submission>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EventLogStore,
  G: SummaryGenerator,
{
  let item = body.item.clone();
  let mut rows = body.into_rows()?;
  let item = state.catalog.canonical_item(&item)?;
  for row in &mut rows {
    row.item.clone_from(&item);
  }

  let entries = state
    .store
    .append_all(rows)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(item = %item, rows = entries.len(), "recorded submission");
  Ok((StatusCode::CREATED, Json(entries)))
}

/// `GET /entries`
pub async fn list<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<Entry>>, ApiError>
where
  S: EventLogStore,
  G: SummaryGenerator,
{
  let entries = state.store.fetch_all().await.map_err(ApiError::store)?;
  Ok(Json(entries))
}
