//! Handlers for the read side. Every request re-reads the whole log.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/dashboard` | Optional `?item=` selects the drill-down |
//! | `GET`  | `/items/{item}/pairs` | Rating/price pairs for one item |
//! | `GET`  | `/items/{item}/notes` | Note frequencies for one item |
//! | `POST` | `/items/{item}/summary` | Generated menu blurb |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tasting_core::{
  normalize::{normalize, parse_facts},
  notes::{NoteFrequencies, note_frequencies},
  pairing::{PairedObservation, pair_samples_for_item},
  store::EventLogStore,
  summary::{SummaryGenerator, summary_prompt},
  view::{DashboardView, render},
};

use crate::{AppState, error::ApiError};

// ─── Dashboard ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
  pub item: Option<String>,
}

/// `GET /dashboard[?item=<item>]`
pub async fn dashboard<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardView>, ApiError>
where
  S: EventLogStore,
  G: SummaryGenerator,
{
  let entries = state.store.fetch_all().await.map_err(ApiError::store)?;
  let view = render(&entries, params.item.as_deref());
  tracing::debug!(entries = entries.len(), items = view.items.len(), "rendered dashboard");
  Ok(Json(view))
}

// ─── Per item ─────────────────────────────────────────────────────────────────

/// `GET /items/{item}/pairs`
pub async fn pairs<S, G>(
  State(state): State<AppState<S, G>>,
  Path(item): Path<String>,
) -> Result<Json<Vec<PairedObservation>>, ApiError>
where
  S: EventLogStore,
  G: SummaryGenerator,
{
  let entries = state.store.fetch_all().await.map_err(ApiError::store)?;
  Ok(Json(pair_samples_for_item(&normalize(&entries), &item)))
}

/// `GET /items/{item}/notes`
pub async fn notes<S, G>(
  State(state): State<AppState<S, G>>,
  Path(item): Path<String>,
) -> Result<Json<NoteFrequencies>, ApiError>
where
  S: EventLogStore,
  G: SummaryGenerator,
{
  let entries = state.store.fetch_all().await.map_err(ApiError::store)?;
  Ok(Json(note_frequencies(&parse_facts(&entries), &item)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
  pub item:    String,
  pub summary: String,
}

/// `POST /items/{item}/summary`
///
/// The generator never fails; its fallback message is returned with 200.
pub async fn summary<S, G>(
  State(state): State<AppState<S, G>>,
  Path(item): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError>
where
  S: EventLogStore,
  G: SummaryGenerator,
{
  let entries = state.store.fetch_all().await.map_err(ApiError::store)?;
  let view = render(&entries, Some(&item));
  let prompt = match &view.focus {
    Some(focus) => summary_prompt(
      focus,
      view.summaries.iter().find(|s| s.item == item),
    ),
    // `render` always focuses a selected item.
    None => return Err(ApiError::BadRequest(format!("no view for {item:?}"))),
  };

  let summary = state.summarizer.generate(&prompt).await;
  Ok(Json(SummaryResponse { item, summary }))
}
