//! Loader for the per-state sales table (`State`, `Silver_Purchased_kg`).

use std::{collections::HashSet, io::Read, path::Path};

use silverhub_core::sales::SalesRecord;

use crate::{
  Result,
  table::{self, Row},
};

pub const STATE: &str = "State";
pub const PURCHASED: &str = "Silver_Purchased_kg";

/// Load the sales table at `path`, preserving file order.
pub fn load_sales(path: impl AsRef<Path>) -> Result<Vec<SalesRecord>> {
  let path = path.as_ref();
  let source = path.display().to_string();
  let records = read_sales(table::open(path)?, &source)?;
  tracing::info!(rows = records.len(), path = %source, "loaded sales table");
  Ok(records)
}

/// Parse a sales table from any reader. `source` names the input in errors.
///
/// Duplicate states are kept as separate rows; each duplicated name is
/// reported once at warn level.
pub fn read_sales<R: Read>(rdr: R, source: &str) -> Result<Vec<SalesRecord>> {
  let mut rdr = table::reader(rdr);
  let headers = rdr.headers().map_err(|e| table::csv_error(source, e))?.clone();
  let [state_idx, kg_idx] = table::resolve_columns(&headers, [STATE, PURCHASED], source)?;

  let mut records = Vec::new();
  for (i, result) in rdr.records().enumerate() {
    let record = result.map_err(|e| table::csv_error(source, e))?;
    let row = Row { record: &record, number: i + 1, source };

    let state = row.field(state_idx);
    if state.is_empty() {
      return Err(row.invalid(STATE, state, "state name is empty"));
    }
    let kg = row.quantity(kg_idx, PURCHASED)?;
    records.push(SalesRecord::new(state, kg));
  }

  for state in duplicate_states(&records) {
    tracing::warn!(%state, path = %source, "state appears more than once; rows kept as-is");
  }

  Ok(records)
}

/// Names that occur more than once, each listed once in first-seen order.
pub fn duplicate_states(records: &[SalesRecord]) -> Vec<&str> {
  let mut seen = HashSet::new();
  let mut reported = HashSet::new();
  records
    .iter()
    .map(|r| r.state.as_str())
    .filter(|s| !seen.insert(*s) && reported.insert(*s))
    .collect()
}
