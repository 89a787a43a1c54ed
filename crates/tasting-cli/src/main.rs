//! `tasting`: terminal client for the tasting feedback server.
//!
//! # Usage
//!
//! ```text
//! tasting dashboard                        # live dashboard (the default)
//! tasting --url http://localhost:8501 submit --name Beth --item Riesling \
//!   --rating 6 --price 15 --note Lemon --note Lime
//! tasting summary Riesling
//! tasting --config ~/.config/tasting/config.toml
//! ```

mod app;
mod client;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tasting_core::{notes::ranked, submission::Submission};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8501";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tasting", about = "Terminal client for tasting event feedback")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the tasting server (default: http://localhost:8501).
  #[arg(long, env = "TASTING_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Open the live terminal dashboard.
  Dashboard,
  /// Record one attendee's feedback for one wine.
  Submit {
    #[arg(long)]
    name:   String,
    #[arg(long)]
    item:   String,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    rating: u8,
    /// Suggested price per glass, in euros.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=30))]
    price:  u32,
    /// A tasting note; repeat for several.
    #[arg(long = "note", value_name = "NOTE")]
    notes:  Vec<String>,
    /// Free-text notes, one per line.
    #[arg(long, default_value = "")]
    custom: String,
  },
  /// Print averages and notes for one wine, or all wines.
  Show { item: Option<String> },
  /// Generate a short menu description for a wine.
  Summary { item: String },
  /// List the submitters, wines and note palette the server offers.
  Catalog,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };
  let client = ApiClient::new(api_config)?;

  let command = args.command.unwrap_or(Command::Dashboard);

  // The TUI owns the terminal, so only one-shot commands log to stderr.
  if !matches!(command, Command::Dashboard) {
    tracing_subscriber::fmt()
      .with_writer(io::stderr)
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::WARN.into())
          .from_env_lossy(),
      )
      .init();
  }

  run_command(client, command).await
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn run_command(client: ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Dashboard => return run_tui(client).await,
    Command::Submit { name, item, rating, price, notes, custom } => {
      let submission = Submission { name, item, rating, price, notes, custom_notes: custom };
      let entries = client.submit(&submission).await?;
      tracing::debug!(rows = entries.len(), "submitted");
      println!("Thanks! Recorded {} entries for {}.", entries.len(), submission.item.trim());
    }
    Command::Show { item } => {
      let view = client.dashboard(item.as_deref()).await?;
      if view.items.is_empty() {
        println!("No feedback yet.");
        return Ok(());
      }
      for s in &view.summaries {
        println!(
          "{:<24} ★ {:<6} € {}",
          s.item,
          ui::items::fmt_average(s.average_rating),
          ui::items::fmt_average(s.average_price),
        );
      }
      if let Some(focus) = view.focus.filter(|_| item.is_some()) {
        println!();
        println!("{}: {} paired tasters", focus.item, focus.pairs.len());
        for (note, count) in ranked(&focus.notes) {
          println!("  {note:<18} {count}");
        }
      }
    }
    Command::Summary { item } => {
      println!("{}", client.summary(&item).await?);
    }
    Command::Catalog => {
      let catalog = client.catalog().await?;
      println!("Submitters: {}", catalog.submitters.join(", "));
      println!("Wines:      {}", catalog.items.join(", "));
      for group in &catalog.palette {
        println!("{:<12}{}", format!("{}:", group.name), group.notes.join(", "));
      }
    }
  }
  Ok(())
}

// ─── TUI ──────────────────────────────────────────────────────────────────────

async fn run_tui(client: ApiClient) -> Result<()> {
  let mut app = App::new(client);

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = match app.refresh().await {
    Ok(()) => run_event_loop(&mut terminal, &mut app).await,
    Err(e) => Err(e),
  };

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}
