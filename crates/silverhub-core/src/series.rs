//! Chart-ready `(x, y)` series derived from filtered records.

use chrono::NaiveDate;

use crate::{price::PriceRecord, sales::SalesRecord};

/// Date → price (INR per kg), in record order.
pub fn price_series(records: &[&PriceRecord]) -> Vec<(NaiveDate, f64)> {
  records.iter().map(|r| (r.date, r.price_inr_per_kg)).collect()
}

/// Earliest and latest date of a price series, whatever its order.
pub fn date_span(series: &[(NaiveDate, f64)]) -> Option<(NaiveDate, NaiveDate)> {
  let first = series.iter().map(|(d, _)| *d).min()?;
  let last = series.iter().map(|(d, _)| *d).max()?;
  Some((first, last))
}

/// Year → price (INR per kg), in record order. Used for a single-month view
/// where the year alone identifies a row.
pub fn yearly_series(records: &[&PriceRecord]) -> Vec<(i32, f64)> {
  records.iter().map(|r| (r.year, r.price_inr_per_kg)).collect()
}

/// State → kilograms purchased, in record order.
pub fn sales_series<'a>(records: &[&'a SalesRecord]) -> Vec<(&'a str, f64)> {
  records
    .iter()
    .map(|r| (r.state.as_str(), r.purchased_kg))
    .collect()
}

/// The closed interval spanned by a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
  pub min: f64,
  pub max: f64,
}

impl Extent {
  /// `None` for an empty input. Non-finite values are ignored.
  pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
    values
      .into_iter()
      .filter(|v| v.is_finite())
      .fold(None, |acc, v| match acc {
        None => Some(Self { min: v, max: v }),
        Some(e) => Some(Self { min: e.min.min(v), max: e.max.max(v) }),
      })
  }

  /// The extent widened so that `min < max`, for use as a chart axis.
  pub fn padded(self) -> Self {
    if self.max > self.min {
      self
    } else {
      Self { min: self.min - 1.0, max: self.max + 1.0 }
    }
  }
}
