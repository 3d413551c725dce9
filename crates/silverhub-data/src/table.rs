//! Shared CSV plumbing: header resolution and typed field parsing with
//! row-level error reporting.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{DataFormatError, Result};

pub(crate) fn open(path: &Path) -> Result<File> {
  File::open(path).map_err(|source| DataFormatError::Io {
    path: path.display().to_string(),
    source,
  })
}

/// A header-aware reader that trims surrounding whitespace from every field.
pub(crate) fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
  ReaderBuilder::new()
    .has_headers(true)
    .trim(Trim::All)
    .from_reader(rdr)
}

pub(crate) fn csv_error(source: &str, err: csv::Error) -> DataFormatError {
  DataFormatError::Csv { path: source.to_owned(), source: err }
}

/// Locate each required column by name. Order and extra columns don't matter.
pub(crate) fn resolve_columns<const N: usize>(
  headers: &StringRecord,
  names: [&'static str; N],
  source: &str,
) -> Result<[usize; N]> {
  let mut positions = [0usize; N];
  for (slot, name) in positions.iter_mut().zip(names) {
    *slot = headers
      .iter()
      .position(|h| h == name)
      .ok_or_else(|| DataFormatError::MissingColumn {
        path:   source.to_owned(),
        column: name,
      })?;
  }
  Ok(positions)
}

/// One data row, carrying enough context to build an
/// [`DataFormatError::InvalidValue`].
pub(crate) struct Row<'a> {
  pub record: &'a StringRecord,
  /// 1-based data row number.
  pub number: usize,
  pub source: &'a str,
}

impl Row<'_> {
  pub fn field(&self, index: usize) -> &str { self.record.get(index).unwrap_or("") }

  pub fn invalid(&self, column: &'static str, value: &str, reason: impl Into<String>) -> DataFormatError {
    DataFormatError::InvalidValue {
      path: self.source.to_owned(),
      row: self.number,
      column,
      value: value.to_owned(),
      reason: reason.into(),
    }
  }

  pub fn integer(&self, index: usize, column: &'static str) -> Result<i32> {
    let raw = self.field(index);
    raw
      .parse::<i32>()
      .map_err(|e| self.invalid(column, raw, format!("not an integer: {e}")))
  }

  /// A finite real number `>= 0`.
  pub fn quantity(&self, index: usize, column: &'static str) -> Result<f64> {
    let raw = self.field(index);
    let value = raw
      .parse::<f64>()
      .map_err(|e| self.invalid(column, raw, format!("not a number: {e}")))?;
    if !value.is_finite() {
      return Err(self.invalid(column, raw, "not a finite number"));
    }
    if value < 0.0 {
      return Err(self.invalid(column, raw, "must not be negative"));
    }
    Ok(value)
  }
}
