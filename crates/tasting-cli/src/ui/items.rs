//! Item list pane: left panel, one row per wine with its averages.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::App;

/// Placeholder for an average with no numeric data behind it.
pub const MISSING: &str = "–";

pub fn fmt_average(value: Option<f64>) -> String {
  value.map_or_else(|| MISSING.to_owned(), |v| format!("{v:.2}"))
}

/// Render the item list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Wines ({}) ", app.view.items.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = app
    .view
    .items
    .iter()
    .map(|item| {
      let summary = app.summary_of(item);
      let rating = fmt_average(summary.and_then(|s| s.average_rating));
      let price = fmt_average(summary.and_then(|s| s.average_price));

      ListItem::new(vec![
        Line::from(Span::styled(
          item.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
          Span::styled("  ★ ", Style::default().fg(Color::Yellow)),
          Span::raw(format!("{rating:<6}")),
          Span::styled("€ ", Style::default().fg(Color::Green)),
          Span::raw(price),
        ]),
      ])
    })
    .collect();

  let mut state = ListState::default();
  state.select((!app.view.items.is_empty()).then_some(app.cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    area,
    &mut state,
  );
}
