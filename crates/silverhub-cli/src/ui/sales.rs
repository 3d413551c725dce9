//! Sales Dashboard page: choropleth, top states, and the monthly price
//! table.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  symbols::Marker,
  text::{Line, Span},
  widgets::{
    Axis, Bar, BarChart, BarGroup, Cell, Chart, Dataset as ChartDataset, GraphType, Paragraph,
    Row, Table, Wrap,
    canvas::{Canvas, Line as CanvasLine},
  },
};
use silverhub_core::{
  region::{self, JoinedRegion, shade_level},
  series::{Extent, sales_series, yearly_series},
};

use super::{format_amount, panel};
use crate::app::App;

/// Light-to-dark blues used to shade regions.
const SHADES: [Color; 5] = [
  Color::Rgb(198, 219, 239),
  Color::Rgb(158, 202, 225),
  Color::Rgb(107, 174, 214),
  Color::Rgb(33, 113, 181),
  Color::Rgb(8, 48, 107),
];

/// Render the sales page into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  // Map on the left; bar chart above the monthly table on the right.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(area);

  let right = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(cols[1]);

  let month = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(right[1]);

  draw_map(f, cols[0], app);
  draw_top_states(f, right[0], app);
  draw_month_table(f, month[0], app);
  draw_month_chart(f, month[1], app);
}

// ─── Choropleth ───────────────────────────────────────────────────────────────

fn draw_map(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("State-wise Sales (Choropleth)");

  let joined = match app.choropleth() {
    Ok(joined) => joined,
    Err(e) => {
      let inner = block.inner(area);
      f.render_widget(block, area);
      let lines = vec![
        Line::from(Span::styled(
          "Map unavailable",
          Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(e.to_string(), Style::default().fg(Color::Red))),
      ];
      f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
      return;
    }
  };

  let (Some(rect), Some(kg)) = (
    region::bounds(&joined),
    Extent::of(joined.iter().map(JoinedRegion::purchased_kg)),
  ) else {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new("Regions have no coordinates."), inner);
    return;
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1)])
    .split(area);

  let canvas = Canvas::default()
    .block(block)
    .marker(Marker::Braille)
    .x_bounds([rect.min().x, rect.max().x])
    .y_bounds([rect.min().y, rect.max().y])
    .paint(|ctx| {
      for j in &joined {
        let color = SHADES[shade_level(j.purchased_kg(), kg.min, kg.max, SHADES.len())];
        for polygon in &j.region.boundary.0 {
          for segment in polygon.exterior().lines() {
            ctx.draw(&CanvasLine {
              x1: segment.start.x,
              y1: segment.start.y,
              x2: segment.end.x,
              y2: segment.end.y,
              color,
            });
          }
        }
      }
    });
  f.render_widget(canvas, rows[0]);

  // Legend: one swatch per shade, labelled with the range ends.
  let mut legend = vec![Span::raw(format!(" {} kg ", format_amount(kg.min)))];
  legend.extend(SHADES.iter().map(|c| Span::styled("██", Style::default().fg(*c))));
  legend.push(Span::raw(format!(" {} kg", format_amount(kg.max))));
  f.render_widget(Paragraph::new(Line::from(legend)), rows[1]);
}

// ─── Top states ───────────────────────────────────────────────────────────────

fn draw_top_states(f: &mut Frame, area: Rect, app: &App) {
  let top = app.top_sales();
  let block = panel(&format!("Top {} States (Highest Sales)", app.top_n));

  if top.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new("No sales data."), inner);
    return;
  }

  let bars: Vec<Bar> = sales_series(&top)
    .into_iter()
    .map(|(state, kg)| {
      Bar::default()
        .value(kg.round().max(0.0) as u64)
        .text_value(format!("{kg:.0}"))
        .label(Line::from(state.to_string()))
        .style(Style::default().fg(Color::Cyan))
    })
    .collect();

  // Share the width between bars, leaving a one-column gap.
  let inner_width = area.width.saturating_sub(2);
  let count = bars.len() as u16;
  let bar_width = (inner_width.saturating_sub(count) / count.max(1)).max(1);

  let chart = BarChart::default()
    .block(block)
    .bar_width(bar_width)
    .bar_gap(1)
    .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
    .data(BarGroup::default().bars(&bars));
  f.render_widget(chart, area);
}

// ─── Monthly table and chart ──────────────────────────────────────────────────

fn draw_month_table(f: &mut Frame, area: Rect, app: &App) {
  let rows_data = app.month_prices();

  let header = Row::new(
    ["Year", "Month", "Silver_Price_INR_per_kg"]
      .iter()
      .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
  )
  .height(1);

  let rows = rows_data.iter().map(|r| {
    Row::new(vec![
      Cell::from(r.year.to_string()),
      Cell::from(r.month.as_str()),
      Cell::from(format_amount(r.price_inr_per_kg)),
    ])
  });

  let widths = [
    Constraint::Length(6),
    Constraint::Length(6),
    Constraint::Min(12),
  ];

  let table = Table::new(rows, widths)
    .header(header)
    .block(panel(&format!("{} Silver Prices ({} rows)", app.month, rows_data.len())));
  f.render_widget(table, area);
}

fn draw_month_chart(f: &mut Frame, area: Rect, app: &App) {
  let block = panel(&format!("{} Price by Year", app.month));
  let rows = app.month_prices();
  let points: Vec<(f64, f64)> = yearly_series(&rows)
    .into_iter()
    .map(|(year, price)| (year as f64, price))
    .collect();

  let (Some(x), Some(y)) = (
    Extent::of(points.iter().map(|p| p.0)),
    Extent::of(points.iter().map(|p| p.1)),
  ) else {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new(format!("No rows for {}.", app.month)).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };
  let (x, y) = (x.padded(), y.padded());

  let datasets = vec![
    ChartDataset::default()
      .marker(Marker::Braille)
      .graph_type(GraphType::Line)
      .style(Style::default().fg(Color::Cyan))
      .data(&points),
  ];

  let chart = Chart::new(datasets)
    .block(block)
    .x_axis(
      Axis::default()
        .title("Year")
        .style(Style::default().fg(Color::Gray))
        .bounds([x.min, x.max])
        .labels(vec![
          Span::raw(format!("{:.0}", x.min)),
          Span::raw(format!("{:.0}", x.max)),
        ]),
    )
    .y_axis(
      Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y.min, y.max])
        .labels(vec![
          Span::raw(format!("{:.0}", y.min)),
          Span::raw(format!("{:.0}", y.max)),
        ]),
    );
  f.render_widget(chart, area);
}
