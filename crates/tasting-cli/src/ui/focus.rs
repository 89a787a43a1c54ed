//! Drill-down pane: right panel for the focused item.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  symbols,
  text::{Line, Span},
  widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType,
    Paragraph, Wrap,
  },
};
use tasting_core::{
  histogram::{Bin, Histogram},
  notes::ranked,
  submission::{PRICE_RANGE, RATING_RANGE},
  view::ItemFocus,
};

use crate::app::{App, Pane};

// ─── Public entry ─────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(focus) = &app.view.focus else {
    let block = Block::default()
      .title(" Dashboard ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No feedback yet. Submit a tasting with `tasting submit`.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  match app.pane {
    Pane::Charts => draw_charts(f, area, focus),
    Pane::Notes => draw_notes(f, area, focus, app.summary.as_deref()),
  }
}

// ─── Charts ───────────────────────────────────────────────────────────────────

fn draw_charts(f: &mut Frame, area: Rect, focus: &ItemFocus) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area);
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(rows[1]);

  draw_scatter(f, rows[0], focus);
  draw_histogram(f, cols[0], " Ratings ", &focus.rating_histogram, Color::Yellow);
  draw_histogram(f, cols[1], " Price (€) ", &focus.price_histogram, Color::Green);
}

fn draw_scatter(f: &mut Frame, area: Rect, focus: &ItemFocus) {
  let points = scatter_points(focus);

  let price_max = f64::from(*PRICE_RANGE.end());
  let rating_max = f64::from(*RATING_RANGE.end());

  let dataset = Dataset::default()
    .name("tasters")
    .marker(symbols::Marker::Dot)
    .graph_type(GraphType::Scatter)
    .style(Style::default().fg(Color::Magenta))
    .data(&points);

  let chart = Chart::new(vec![dataset])
    .block(
      Block::default()
        .title(format!(" {} · price vs rating ({}) ", focus.item, points.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    )
    .x_axis(
      Axis::default()
        .title("★")
        .bounds([0.0, rating_max])
        .labels(["0", "5", "10"]),
    )
    .y_axis(
      Axis::default()
        .title("€")
        .bounds([0.0, price_max])
        .labels(["0", "15", "30"]),
    );
  f.render_widget(chart, area);
}

/// One `(rating, price)` point per paired taster: rating on x, price on y.
pub fn scatter_points(focus: &ItemFocus) -> Vec<(f64, f64)> {
  focus.pairs.iter().map(|p| (p.rating, p.price)).collect()
}

fn draw_histogram(f: &mut Frame, area: Rect, title: &str, hist: &Histogram, color: Color) {
  let bars: Vec<Bar> = hist
    .bins
    .iter()
    .map(|bin| {
      Bar::default()
        .value(bin.count as u64)
        .label(Line::from(bin_label(bin, hist.size)))
        .style(Style::default().fg(color))
    })
    .collect();

  let chart = BarChart::default()
    .block(
      Block::default()
        .title(format!("{title}({}) ", hist.total()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    )
    .data(BarGroup::default().bars(&bars))
    .bar_width(3)
    .bar_gap(1);
  f.render_widget(chart, area);
}

/// Unit-width bins are labelled by their centre, wider ones by their range.
pub fn bin_label(bin: &Bin, size: f64) -> String {
  if size <= 1.0 {
    format!("{}", ((bin.lower + bin.upper) / 2.0).round())
  } else {
    format!("{}-{}", bin.lower, bin.upper)
  }
}

// ─── Notes ────────────────────────────────────────────────────────────────────

fn draw_notes(f: &mut Frame, area: Rect, focus: &ItemFocus, summary: Option<&str>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(area);

  let notes = ranked(&focus.notes);
  let lines: Vec<Line> = if notes.is_empty() {
    vec![Line::from(Span::styled(
      "No tasting notes yet.",
      Style::default().fg(Color::DarkGray),
    ))]
  } else {
    let widest = notes.first().map_or(1, |(_, n)| *n).max(1);
    notes
      .iter()
      .map(|(note, count)| {
        Line::from(vec![
          Span::styled(
            format!("{note:<18}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
          ),
          Span::raw(format!("{count:>3} ")),
          Span::styled(
            "█".repeat(count * 20 / widest),
            Style::default().fg(Color::Cyan),
          ),
        ])
      })
      .collect()
  };

  f.render_widget(
    Paragraph::new(lines).block(
      Block::default()
        .title(format!(" {} · notes ", focus.item))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    ),
    rows[0],
  );

  let (text, style) = match summary {
    Some(s) => (s, Style::default()),
    None => ("Press s to generate a summary.", Style::default().fg(Color::DarkGray)),
  };
  f.render_widget(
    Paragraph::new(text)
      .style(style)
      .wrap(Wrap { trim: true })
      .block(
        Block::default()
          .title(" Summary ")
          .borders(Borders::ALL)
          .border_style(Style::default().fg(Color::DarkGray)),
      ),
    rows[1],
  );
}
