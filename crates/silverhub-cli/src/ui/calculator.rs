//! Price Calculator page: inputs, result and the price history chart.

use chrono::Datelike;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  symbols::Marker,
  text::{Line, Span},
  widgets::{Axis, Chart, Dataset as ChartDataset, GraphType, Paragraph},
};
use silverhub_core::{
  query::PriceRange,
  series::{Extent, date_span, price_series},
};

use super::{format_amount, panel};
use crate::app::{App, Field};

/// Render the calculator page into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(9), Constraint::Min(0)])
    .split(area);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(rows[0]);

  draw_inputs(f, cols[0], app);
  draw_result(f, cols[1], app);
  draw_history(f, rows[1], app);
}

// ─── Inputs ───────────────────────────────────────────────────────────────────

fn draw_inputs(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("Inputs");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let weight = if app.focus == Field::Weight {
    format!("{}_", app.weight_input)
  } else {
    app.weight_input.clone()
  };
  let price = if app.focus == Field::PricePerGram {
    format!("{}_", app.price_input)
  } else {
    app.price_input.clone()
  };

  let lines = vec![
    input_line(app, Field::Weight, "Enter Weight", weight),
    input_line(app, Field::Unit, "Unit", format!("‹ {} ›", app.unit.label())),
    input_line(app, Field::PricePerGram, "Price per Gram (INR)", price),
    input_line(app, Field::Currency, "Currency", format!("‹ {} ›", app.currency.code())),
    input_line(
      app,
      Field::PriceRange,
      "Price Range (INR/kg)",
      format!("‹ {} ›", app.price_range.label()),
    ),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn input_line(app: &App, field: Field, label: &str, value: String) -> Line<'static> {
  let focused = app.focus == field;
  let marker = if focused { "▶ " } else { "  " };
  let value_style = if focused {
    Style::default()
      .fg(Color::White)
      .bg(Color::Blue)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default()
  };

  Line::from(vec![
    Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
    Span::styled(
      format!("{label:<22}"),
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ),
    Span::styled(value, value_style),
  ])
}

// ─── Result ───────────────────────────────────────────────────────────────────

fn draw_result(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("Calculation Result");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines = match app.calculation() {
    Ok(calc) => vec![
      Line::from(""),
      Line::from(Span::styled(
        format!("  Total Cost ({})", app.currency.code()),
        Style::default().fg(Color::Gray),
      )),
      Line::from(Span::styled(
        format!("  {}", format_amount(calc.cost)),
        Style::default()
          .fg(Color::Green)
          .add_modifier(Modifier::BOLD),
      )),
      Line::from(""),
      Line::from(Span::styled(
        format!("  {} g at fixed rate {} USD/INR", format_amount(calc.grams), app.rate.inr_to_usd),
        Style::default().fg(Color::DarkGray),
      )),
    ],
    Err(msg) => vec![
      Line::from(""),
      Line::from(Span::styled(
        "  Cannot calculate:".to_string(),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
      )),
      Line::from(Span::styled(format!("  {msg}"), Style::default().fg(Color::Red))),
    ],
  };
  f.render_widget(Paragraph::new(lines), inner);
}

// ─── History chart ────────────────────────────────────────────────────────────

fn draw_history(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_prices();
  let title = match app.price_range {
    PriceRange::All => format!("Historical Price Trends ({} months)", filtered.len()),
    range => format!("Historical Price Trends, {} ({} months)", range.label(), filtered.len()),
  };
  let block = panel(&title);

  let series = price_series(&filtered);
  if series.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No prices in this range.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  // x is a fractional year so that months sit evenly between years.
  let points: Vec<(f64, f64)> = series
    .iter()
    .map(|(date, price)| (date.year() as f64 + date.month0() as f64 / 12.0, *price))
    .collect();

  let (Some(x), Some(y)) = (
    Extent::of(points.iter().map(|p| p.0)),
    Extent::of(points.iter().map(|p| p.1)),
  ) else {
    return;
  };
  let (x, y) = (x.padded(), y.padded());

  let (first, last) = date_span(&series)
    .map(|(a, b)| (a.format("%b %Y").to_string(), b.format("%b %Y").to_string()))
    .unwrap_or_default();

  let datasets = vec![
    ChartDataset::default()
      .name("Silver_Price_INR_per_kg")
      .marker(Marker::Braille)
      .graph_type(GraphType::Line)
      .style(Style::default().fg(Color::Cyan))
      .data(&points),
  ];

  let chart = Chart::new(datasets)
    .block(block)
    .x_axis(
      Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::Gray))
        .bounds([x.min, x.max])
        .labels(vec![Span::raw(first), Span::raw(last)]),
    )
    .y_axis(
      Axis::default()
        .title("INR/kg")
        .style(Style::default().fg(Color::Gray))
        .bounds([y.min, y.max])
        .labels(vec![
          Span::raw(format!("{:.0}", y.min)),
          Span::raw(format!("{:.0}", (y.min + y.max) / 2.0)),
          Span::raw(format!("{:.0}", y.max)),
        ]),
    );
  f.render_widget(chart, area);
}
