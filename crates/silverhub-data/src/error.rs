//! Error type for `silverhub-data`.

use thiserror::Error;

/// A base table could not be loaded. Always fatal to startup: no partially
/// loaded [`Dataset`](crate::Dataset) is ever built.
#[derive(Debug, Error)]
pub enum DataFormatError {
  #[error("failed to read {path}: {source}")]
  Io {
    path:   String,
    #[source]
    source: std::io::Error,
  },

  #[error("CSV error in {path}: {source}")]
  Csv {
    path:   String,
    #[source]
    source: csv::Error,
  },

  #[error("{path}: missing required column {column:?}")]
  MissingColumn { path: String, column: &'static str },

  #[error("{path}, row {row}, column {column:?}: {reason} (value {value:?})")]
  InvalidValue {
    path:   String,
    /// 1-based data row number (the header is row 0).
    row:    usize,
    column: &'static str,
    value:  String,
    reason: String,
  },
}

pub type Result<T, E = DataFormatError> = std::result::Result<T, E>;
