//! The query/filter layer: weight and currency conversion, price-range
//! buckets, top-N selection and month selection.
//!
//! Every function borrows the immutable base tables and returns a fresh
//! projection; nothing here mutates its input or performs I/O.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ValidationError, price::PriceRecord, sales::SalesRecord};

// ─── Weight ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightUnit {
  #[default]
  Grams,
  Kilograms,
}

impl WeightUnit {
  pub const ALL: [WeightUnit; 2] = [Self::Grams, Self::Kilograms];

  pub fn label(self) -> &'static str {
    match self {
      Self::Grams => "Grams",
      Self::Kilograms => "Kilograms",
    }
  }

  fn grams_per_unit(self) -> f64 {
    match self {
      Self::Grams => 1.0,
      Self::Kilograms => 1000.0,
    }
  }
}

/// Convert `value` expressed in `unit` to grams.
pub fn convert_weight(value: f64, unit: WeightUnit) -> Result<f64, ValidationError> {
  let value = ValidationError::check_non_negative("weight", value)?;
  Ok(value * unit.grams_per_unit())
}

// ─── Currency ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
  #[default]
  #[serde(rename = "INR")]
  Inr,
  #[serde(rename = "USD")]
  Usd,
}

impl Currency {
  pub const ALL: [Currency; 2] = [Self::Inr, Self::Usd];

  pub fn code(self) -> &'static str {
    match self {
      Self::Inr => "INR",
      Self::Usd => "USD",
    }
  }
}

/// The INR→USD conversion factor.
///
/// This is a fixed configuration value, not a live exchange rate. The
/// default (0.012) reflects the rate at the time the datasets were bundled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
  #[serde(default = "default_inr_to_usd")]
  pub inr_to_usd: f64,
}

pub const DEFAULT_INR_TO_USD: f64 = 0.012;

fn default_inr_to_usd() -> f64 { DEFAULT_INR_TO_USD }

impl Default for ExchangeRate {
  fn default() -> Self { Self { inr_to_usd: DEFAULT_INR_TO_USD } }
}

/// Cost of `grams` at `price_per_gram` (INR), expressed in `currency`.
pub fn compute_cost(
  grams: f64,
  price_per_gram: f64,
  currency: Currency,
  rate: &ExchangeRate,
) -> Result<f64, ValidationError> {
  let grams = ValidationError::check_non_negative("weight", grams)?;
  let price_per_gram = ValidationError::check_non_negative("price per gram", price_per_gram)?;
  let inr = grams * price_per_gram;
  Ok(match currency {
    Currency::Inr => inr,
    Currency::Usd => inr * rate.inr_to_usd,
  })
}

// ─── Price range ─────────────────────────────────────────────────────────────

/// Price buckets over INR per kilogram.
///
/// `UpTo20k` includes 20 000 and `From30k` includes 30 000; the middle bucket
/// is open on both ends, so every price lands in exactly one non-`All`
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceRange {
  #[default]
  All,
  UpTo20k,
  Between20kAnd30k,
  From30k,
}

const LOWER_BOUND: f64 = 20_000.0;
const UPPER_BOUND: f64 = 30_000.0;

impl PriceRange {
  pub const ALL: [PriceRange; 4] =
    [Self::All, Self::UpTo20k, Self::Between20kAnd30k, Self::From30k];

  pub fn label(self) -> &'static str {
    match self {
      Self::All => "Show All",
      Self::UpTo20k => "≤ 20,000",
      Self::Between20kAnd30k => "20,000 - 30,000",
      Self::From30k => "≥ 30,000",
    }
  }

  /// Whether a price (INR per kg) falls in this bucket.
  pub fn contains(self, price: f64) -> bool {
    match self {
      Self::All => true,
      Self::UpTo20k => price <= LOWER_BOUND,
      Self::Between20kAnd30k => price > LOWER_BOUND && price < UPPER_BOUND,
      Self::From30k => price >= UPPER_BOUND,
    }
  }
}

impl fmt::Display for PriceRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for PriceRange {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|r| r.label() == s)
      .ok_or_else(|| format!("unknown price range: {s:?}"))
  }
}

/// Records whose price falls in `range`, in input order.
pub fn filter_by_price_range(records: &[PriceRecord], range: PriceRange) -> Vec<&PriceRecord> {
  records
    .iter()
    .filter(|r| range.contains(r.price_inr_per_kg))
    .collect()
}

// ─── Top N ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  Ascending,
  #[default]
  Descending,
}

/// The first `n` sales rows ordered by kilograms purchased.
///
/// The sort is stable: rows with equal kilograms keep their input order.
pub fn top_n(sales: &[SalesRecord], n: usize, order: SortOrder) -> Vec<&SalesRecord> {
  let mut sorted: Vec<&SalesRecord> = sales.iter().collect();
  sorted.sort_by(|a, b| {
    let ord = a.purchased_kg.total_cmp(&b.purchased_kg);
    match order {
      SortOrder::Ascending => ord,
      SortOrder::Descending => ord.reverse(),
    }
  });
  sorted.truncate(n);
  sorted
}

// ─── Month ───────────────────────────────────────────────────────────────────

/// Records whose month abbreviation equals `month` exactly, in input order.
pub fn filter_by_month<'a>(records: &'a [PriceRecord], month: &str) -> Vec<&'a PriceRecord> {
  records.iter().filter(|r| r.month.as_str() == month).collect()
}
