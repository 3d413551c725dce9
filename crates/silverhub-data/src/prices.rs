//! Loader for the historical price table
//! (`Year`, `Month`, `Silver_Price_INR_per_kg`).

use std::{io::Read, path::Path};

use silverhub_core::price::{Month, PriceRecord};

use crate::{
  Result,
  table::{self, Row},
};

pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const PRICE: &str = "Silver_Price_INR_per_kg";

/// Load the price table at `path`, preserving file order.
pub fn load_prices(path: impl AsRef<Path>) -> Result<Vec<PriceRecord>> {
  let path = path.as_ref();
  let source = path.display().to_string();
  let records = read_prices(table::open(path)?, &source)?;
  tracing::info!(rows = records.len(), path = %source, "loaded price table");
  Ok(records)
}

/// Parse a price table from any reader. `source` names the input in errors.
pub fn read_prices<R: Read>(rdr: R, source: &str) -> Result<Vec<PriceRecord>> {
  let mut rdr = table::reader(rdr);
  let headers = rdr.headers().map_err(|e| table::csv_error(source, e))?.clone();
  let [year_idx, month_idx, price_idx] =
    table::resolve_columns(&headers, [YEAR, MONTH, PRICE], source)?;

  let mut records = Vec::new();
  for (i, result) in rdr.records().enumerate() {
    let record = result.map_err(|e| table::csv_error(source, e))?;
    let row = Row { record: &record, number: i + 1, source };

    let year = row.integer(year_idx, YEAR)?;
    let raw_month = row.field(month_idx);
    let month: Month = raw_month
      .parse()
      .map_err(|e: silverhub_core::Error| row.invalid(MONTH, raw_month, e.to_string()))?;
    let price = row.quantity(price_idx, PRICE)?;

    let price_record = PriceRecord::new(year, month, price)
      .map_err(|e| row.invalid(YEAR, row.field(year_idx), e.to_string()))?;
    records.push(price_record);
  }

  Ok(records)
}
