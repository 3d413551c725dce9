//! Historical price records, one row per (year, month).
//!
//! The month is a closed enum so an unrecognised token can only ever surface
//! as a load-time error, never as a missing date further downstream.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Month ───────────────────────────────────────────────────────────────────

/// A calendar month, spelled as its three-letter English abbreviation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Month {
  Jan,
  Feb,
  Mar,
  Apr,
  May,
  Jun,
  Jul,
  Aug,
  Sep,
  Oct,
  Nov,
  Dec,
}

impl Month {
  /// All months in calendar order.
  pub const ALL: [Month; 12] = [
    Self::Jan,
    Self::Feb,
    Self::Mar,
    Self::Apr,
    Self::May,
    Self::Jun,
    Self::Jul,
    Self::Aug,
    Self::Sep,
    Self::Oct,
    Self::Nov,
    Self::Dec,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Jan => "Jan",
      Self::Feb => "Feb",
      Self::Mar => "Mar",
      Self::Apr => "Apr",
      Self::May => "May",
      Self::Jun => "Jun",
      Self::Jul => "Jul",
      Self::Aug => "Aug",
      Self::Sep => "Sep",
      Self::Oct => "Oct",
      Self::Nov => "Nov",
      Self::Dec => "Dec",
    }
  }

  /// 1-based month number (`Jan` = 1).
  pub fn number(self) -> u32 { self as u32 + 1 }

  /// The following month, wrapping `Dec` to `Jan`.
  pub fn succ(self) -> Self { Self::ALL[(self as usize + 1) % 12] }

  /// The preceding month, wrapping `Jan` to `Dec`.
  pub fn pred(self) -> Self { Self::ALL[(self as usize + 11) % 12] }
}

impl fmt::Display for Month {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Month {
  type Err = Error;

  /// Only the exact abbreviations (`"Jan"` … `"Dec"`) are accepted.
  fn from_str(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|m| m.as_str() == s)
      .ok_or_else(|| Error::UnknownMonth(s.to_owned()))
  }
}

// ─── PriceRecord ─────────────────────────────────────────────────────────────

/// One row of the historical price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
  pub year:             i32,
  pub month:            Month,
  pub price_inr_per_kg: f64,
  /// First day of `month` in `year`; derived, never read from the file.
  pub date:             NaiveDate,
}

impl PriceRecord {
  /// Build a record and derive its first-of-month date.
  pub fn new(year: i32, month: Month, price_inr_per_kg: f64) -> Result<Self> {
    let date = first_of_month(year, month)?;
    Ok(Self { year, month, price_inr_per_kg, date })
  }
}

/// The first calendar day of `month` in `year`.
pub fn first_of_month(year: i32, month: Month) -> Result<NaiveDate> {
  NaiveDate::from_ymd_opt(year, month.number(), 1).ok_or(Error::InvalidDate {
    year,
    month: month.number(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn month_round_trips_through_its_abbreviation() {
    for m in Month::ALL {
      assert_eq!(m.as_str().parse::<Month>().unwrap(), m);
    }
  }

  #[test]
  fn month_rejects_unknown_tokens() {
    for bad in ["jan", "January", "Jann", "", " Jan"] {
      assert!(matches!(bad.parse::<Month>(), Err(Error::UnknownMonth(_))));
    }
  }

  #[test]
  fn month_numbers_and_wrapping() {
    assert_eq!(Month::Jan.number(), 1);
    assert_eq!(Month::Dec.number(), 12);
    assert_eq!(Month::Dec.succ(), Month::Jan);
    assert_eq!(Month::Jan.pred(), Month::Dec);
  }

  #[test]
  fn date_is_first_of_month() {
    let r = PriceRecord::new(2020, Month::Feb, 25_000.0).unwrap();
    assert_eq!(r.date, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
  }

  #[test]
  fn dates_follow_year_month_order() {
    let a = PriceRecord::new(2019, Month::Dec, 1.0).unwrap();
    let b = PriceRecord::new(2020, Month::Jan, 1.0).unwrap();
    let c = PriceRecord::new(2020, Month::Mar, 1.0).unwrap();
    assert!(a.date < b.date && b.date < c.date);
  }

  #[test]
  fn out_of_range_year_is_an_error() {
    let err = PriceRecord::new(i32::MAX, Month::Jan, 1.0).unwrap_err();
    assert!(matches!(err, Error::InvalidDate { .. }));
  }
}
