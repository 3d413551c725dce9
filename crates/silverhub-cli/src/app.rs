//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use silverhub_core::{
  GeoJoinError,
  price::{Month, PriceRecord},
  query::{
    self, Currency, ExchangeRate, PriceRange, SortOrder, WeightUnit, compute_cost,
    convert_weight,
  },
  region::JoinedRegion,
  sales::SalesRecord,
};
use silverhub_data::Dataset;

use crate::settings::Settings;

// ─── Page ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
  PriceCalculator,
  SalesDashboard,
}

impl Page {
  pub fn title(self) -> &'static str {
    match self {
      Self::PriceCalculator => "Silver Price Calculator",
      Self::SalesDashboard => "Silver Sales Dashboard",
    }
  }

  fn other(self) -> Self {
    match self {
      Self::PriceCalculator => Self::SalesDashboard,
      Self::SalesDashboard => Self::PriceCalculator,
    }
  }
}

/// Calculator widgets, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Weight,
  Unit,
  PricePerGram,
  Currency,
  PriceRange,
}

impl Field {
  const ORDER: [Field; 5] = [
    Self::Weight,
    Self::Unit,
    Self::PricePerGram,
    Self::Currency,
    Self::PriceRange,
  ];

  fn step(self, forward: bool) -> Self {
    let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
    let n = Self::ORDER.len();
    Self::ORDER[if forward { (i + 1) % n } else { (i + n - 1) % n }]
  }

  fn is_text(self) -> bool { matches!(self, Self::Weight | Self::PricePerGram) }
}

/// Result of the calculator for the current inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
  pub grams: f64,
  pub cost:  f64,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
///
/// Only widget values live here; every panel is recomputed from the
/// immutable [`Dataset`] on each frame.
pub struct App {
  pub page: Page,

  /// Loaded once at startup and shared read-only.
  pub dataset: Arc<Dataset>,

  pub rate:  ExchangeRate,
  pub top_n: usize,

  /// Calculator field with keyboard focus.
  pub focus:          Field,
  /// Raw text of the weight input.
  pub weight_input:   String,
  pub unit:           WeightUnit,
  /// Raw text of the price-per-gram (INR) input.
  pub price_input:    String,
  pub currency:       Currency,
  pub price_range:    PriceRange,

  /// Month shown by the monthly price table.
  pub month: Month,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(dataset: Arc<Dataset>, settings: &Settings) -> Self {
    Self {
      page: Page::PriceCalculator,
      dataset,
      rate: settings.currency,
      top_n: settings.dashboard.top_n,
      focus: Field::Weight,
      weight_input: "1.0".into(),
      unit: WeightUnit::Grams,
      price_input: "95.0".into(),
      currency: Currency::Inr,
      price_range: PriceRange::All,
      month: settings.dashboard.month,
      status_msg: String::new(),
    }
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// Total grams and cost for the calculator inputs, or a message explaining
  /// which input needs fixing.
  pub fn calculation(&self) -> Result<Calculation, String> {
    let weight = parse_input("weight", &self.weight_input)?;
    let price = parse_input("price per gram", &self.price_input)?;
    let grams = convert_weight(weight, self.unit).map_err(|e| e.to_string())?;
    let cost =
      compute_cost(grams, price, self.currency, &self.rate).map_err(|e| e.to_string())?;
    Ok(Calculation { grams, cost })
  }

  /// Price history restricted to the selected price range.
  pub fn filtered_prices(&self) -> Vec<&PriceRecord> {
    query::filter_by_price_range(self.dataset.prices(), self.price_range)
  }

  /// The best-selling states for the bar chart.
  pub fn top_sales(&self) -> Vec<&SalesRecord> {
    query::top_n(self.dataset.sales(), self.top_n, SortOrder::Descending)
  }

  /// Price rows for the selected month.
  pub fn month_prices(&self) -> Vec<&PriceRecord> {
    query::filter_by_month(self.dataset.prices(), self.month.as_str())
  }

  pub fn choropleth(&self) -> Result<Vec<JoinedRegion<'_>>, GeoJoinError> {
    self.dataset.choropleth()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return false,
      KeyCode::Tab | KeyCode::BackTab => {
        self.page = self.page.other();
        self.status_msg.clear();
        return true;
      }
      // Digits belong to the text inputs while one of them has focus.
      KeyCode::Char(c @ ('1' | '2')) if !self.typing() => {
        self.page = if c == '1' { Page::PriceCalculator } else { Page::SalesDashboard };
        self.status_msg.clear();
        return true;
      }
      _ => {}
    }

    match self.page {
      Page::PriceCalculator => self.handle_calculator_key(key),
      Page::SalesDashboard => self.handle_sales_key(key),
    }
    true
  }

  fn handle_calculator_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Enter => self.focus = self.focus.step(true),
      KeyCode::Up => self.focus = self.focus.step(false),
      KeyCode::Left => self.cycle_choice(false),
      KeyCode::Right => self.cycle_choice(true),
      KeyCode::Backspace if self.focus.is_text() => {
        self.focused_input().pop();
      }
      KeyCode::Char(c) if self.focus.is_text() && (c.is_ascii_digit() || c == '.' || c == '-') => {
        self.focused_input().push(c);
      }
      _ => {}
    }

    self.status_msg = match self.calculation() {
      Ok(_) => String::new(),
      Err(msg) => msg,
    };
  }

  fn handle_sales_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Left | KeyCode::Char('h') => self.month = self.month.pred(),
      KeyCode::Right | KeyCode::Char('l') => self.month = self.month.succ(),
      _ => {}
    }
    if self.month_prices().is_empty() {
      self.status_msg = format!("No price rows for {}", self.month);
    } else {
      self.status_msg.clear();
    }
  }

  fn typing(&self) -> bool { self.page == Page::PriceCalculator && self.focus.is_text() }

  fn focused_input(&mut self) -> &mut String {
    match self.focus {
      Field::PricePerGram => &mut self.price_input,
      _ => &mut self.weight_input,
    }
  }

  fn cycle_choice(&mut self, forward: bool) {
    match self.focus {
      Field::Unit => self.unit = cycle(&WeightUnit::ALL, self.unit, forward),
      Field::Currency => self.currency = cycle(&Currency::ALL, self.currency, forward),
      Field::PriceRange => self.price_range = cycle(&PriceRange::ALL, self.price_range, forward),
      Field::Weight | Field::PricePerGram => {}
    }
  }
}

fn parse_input(field: &str, raw: &str) -> Result<f64, String> {
  raw
    .trim()
    .parse::<f64>()
    .map_err(|_| format!("{field} must be a number (got {raw:?})"))
}

/// The option after (or before) `current` in `options`, wrapping around.
fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
  let n = options.len();
  let i = options.iter().position(|o| *o == current).unwrap_or(0);
  options[if forward { (i + 1) % n } else { (i + n - 1) % n }]
}
