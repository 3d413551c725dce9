//! Core types and pure query functions for the Silver Analytics Hub.
//!
//! This crate is deliberately free of file and terminal dependencies.
//! Loading lives in `silverhub-data`; rendering lives in `silverhub-cli`.
//! Every function here is a pure function of borrowed, immutable inputs.

pub mod error;
pub mod price;
pub mod query;
pub mod region;
pub mod sales;
pub mod series;

pub use error::{Error, GeoJoinError, Result, ValidationError};
