//! TUI rendering for both pages.

pub mod calculator;
pub mod sales;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Page};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.page {
    Page::PriceCalculator => calculator::draw(f, rows[1], app),
    Page::SalesDashboard => sales::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let mut spans = vec![Span::styled(
    " Silver Analytics Hub ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for page in [Page::PriceCalculator, Page::SalesDashboard] {
    let style = if page == app.page {
      Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(format!(" {} ", page.title()), style));
  }

  // Simple left-right header: pad the middle.
  let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.content.len());
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.page {
    Page::PriceCalculator => (
      "CALC",
      "↑↓ field  ←→ choose  type digits  Tab/2 sales  q quit",
    ),
    Page::SalesDashboard => ("SALES", "←→ month  Tab/1 calculator  q quit"),
  };

  let (status, status_style) = if app.status_msg.is_empty() {
    (hints.to_string(), Style::default().fg(Color::DarkGray))
  } else {
    (app.status_msg.clone(), Style::default().fg(Color::Yellow))
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), status_style);

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// Format a number with thousands separators and two decimals, e.g.
/// `1234567.891` → `1,234,567.89`.
pub fn format_amount(value: f64) -> String {
  let fixed = format!("{:.2}", value.abs());
  let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

  let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
  for (i, c) in int_part.chars().enumerate() {
    if i > 0 && (int_part.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }

  let sign = if value < 0.0 { "-" } else { "" };
  format!("{sign}{grouped}.{frac_part}")
}

/// A bordered block with a dimmed border, as used by every panel.
pub fn panel(title: &str) -> Block<'static> {
  Block::default()
    .title(format!(" {title} "))
    .borders(ratatui::widgets::Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}
