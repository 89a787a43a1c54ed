//! Application state and key dispatch for the dashboard TUI.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tasting_core::{aggregate::ItemSummary, view::DashboardView};

use crate::client::ApiClient;

// ─── Pane ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
  /// Histograms and the rating/price scatter for the focused item.
  Charts,
  /// Ranked tasting notes and the generated summary.
  Notes,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub pane: Pane,

  /// Last dashboard fetched from the server.
  pub view: DashboardView,

  /// Cursor position within `view.items`.
  pub cursor: usize,

  /// Generated summary for `summary_for`, if requested.
  pub summary:     Option<String>,
  pub summary_for: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      pane: Pane::Charts,
      view: DashboardView {
        items:     Vec::new(),
        summaries: Vec::new(),
        pairs:     Vec::new(),
        focus:     None,
      },
      cursor: 0,
      summary: None,
      summary_for: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Re-fetch the dashboard, keeping the cursor on the same item if it still
  /// exists.
  pub async fn refresh(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading…".into();
    let selected = self.selected_item().map(str::to_owned);
    match self.client.dashboard(selected.as_deref()).await {
      Ok(view) => {
        self.apply_view(view);
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Install a freshly fetched view and re-anchor the cursor on its focus.
  pub fn apply_view(&mut self, view: DashboardView) {
    let focused = view.focus.as_ref().map(|f| f.item.as_str());
    self.cursor = focused
      .and_then(|item| view.items.iter().position(|i| i == item))
      .unwrap_or(0);
    if self.summary_for.as_deref() != focused {
      self.summary = None;
      self.summary_for = None;
    }
    self.view = view;
  }

  async fn focus_cursor(&mut self) {
    let Some(item) = self.selected_item().map(str::to_owned) else {
      return;
    };
    match self.client.dashboard(Some(&item)).await {
      Ok(view) => self.apply_view(view),
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  async fn generate_summary(&mut self) {
    let Some(item) = self.selected_item().map(str::to_owned) else {
      self.status_msg = "Nothing to summarise yet.".into();
      return;
    };
    match self.client.summary(&item).await {
      Ok(text) => {
        self.summary = Some(text);
        self.summary_for = Some(item);
        self.pane = Pane::Notes;
        self.status_msg = String::new();
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  // ── Selection ─────────────────────────────────────────────────────────────

  pub fn selected_item(&self) -> Option<&str> {
    self.view.items.get(self.cursor).map(String::as_str)
  }

  pub fn summary_of(&self, item: &str) -> Option<&ItemSummary> {
    self.view.summaries.iter().find(|s| s.item == item)
  }

  /// Move the cursor by `delta`, clamped to the item list. Returns whether it
  /// moved.
  pub fn move_cursor(&mut self, delta: isize) -> bool {
    let len = self.view.items.len();
    if len == 0 {
      return false;
    }
    let next = self.cursor.saturating_add_signed(delta).min(len - 1);
    let moved = next != self.cursor;
    self.cursor = next;
    moved
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        if self.move_cursor(1) {
          self.focus_cursor().await;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.move_cursor(-1) {
          self.focus_cursor().await;
        }
      }

      KeyCode::Tab => {
        self.pane = match self.pane {
          Pane::Charts => Pane::Notes,
          Pane::Notes => Pane::Charts,
        };
      }

      // Errors are already shown in the status bar.
      KeyCode::Char('r') => {
        let _ = self.refresh().await;
      }
      KeyCode::Char('s') => self.generate_summary().await,

      _ => {}
    }
    Ok(true)
  }
}
