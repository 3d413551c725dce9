//! Error types for `silverhub-core`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("unknown month abbreviation: {0:?}")]
  UnknownMonth(String),

  #[error("no calendar date for year {year}, month {month}")]
  InvalidDate { year: i32, month: u32 },

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  GeoJoin(#[from] GeoJoinError),
}

/// A user-supplied number was rejected before any calculation ran.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("{field} must not be negative (got {value})")]
  Negative { field: &'static str, value: f64 },

  #[error("{field} must be a finite number")]
  NotFinite { field: &'static str },
}

impl ValidationError {
  /// Check that `value` is finite and `>= 0`.
  pub fn check_non_negative(field: &'static str, value: f64) -> Result<f64, Self> {
    if !value.is_finite() {
      return Err(Self::NotFinite { field });
    }
    if value < 0.0 {
      return Err(Self::Negative { field, value });
    }
    Ok(value)
  }
}

/// The choropleth could not be produced. Recoverable: only the map panel
/// degrades.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoJoinError {
  #[error("region geometry unavailable: {0}")]
  GeometryUnavailable(String),

  #[error("no sales record matched any region name")]
  EmptyJoin,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn non_negative_accepts_zero() {
    assert_eq!(ValidationError::check_non_negative("weight", 0.0), Ok(0.0));
  }

  #[test]
  fn non_negative_rejects_negative_and_nan() {
    assert_eq!(
      ValidationError::check_non_negative("weight", -1.5),
      Err(ValidationError::Negative { field: "weight", value: -1.5 })
    );
    assert_eq!(
      ValidationError::check_non_negative("price", f64::NAN),
      Err(ValidationError::NotFinite { field: "price" })
    );
  }
}
