//! Per-state sales totals.

use serde::{Deserialize, Serialize};

/// Kilograms of silver purchased in one state.
///
/// `state` is compared exactly against region names when joining. The table
/// is not deduplicated: two rows for the same state stay two rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
  pub state:        String,
  pub purchased_kg: f64,
}

impl SalesRecord {
  pub fn new(state: impl Into<String>, purchased_kg: f64) -> Self {
    Self { state: state.into(), purchased_kg }
  }
}
