//! File loaders for the Silver Analytics Hub.
//!
//! Reads the two CSV base tables and the region boundary collection into
//! the types defined in `silverhub-core`, and bundles them into an
//! immutable [`Dataset`].

mod table;

pub mod dataset;
pub mod error;
pub mod geometry;
pub mod prices;
pub mod sales;

pub use dataset::{DataPaths, Dataset};
pub use error::{DataFormatError, Result};

#[cfg(test)]
mod tests;
