//! [`Dataset`]: the immutable handle every view reads from.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use silverhub_core::{
  GeoJoinError,
  price::PriceRecord,
  region::{JoinedRegion, RegionGeometry, join_sales_to_geometry},
  sales::SalesRecord,
};

use crate::{Result, geometry::load_geometry, prices::load_prices, sales::load_sales};

// ─── Paths ───────────────────────────────────────────────────────────────────

/// Where the three input files live. Relative paths are resolved against
/// the process working directory, or against a data directory via
/// [`DataPaths::in_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataPaths {
  #[serde(default = "default_prices")]
  pub prices:   PathBuf,
  #[serde(default = "default_sales")]
  pub sales:    PathBuf,
  #[serde(default = "default_geometry")]
  pub geometry: PathBuf,
}

fn default_prices() -> PathBuf { PathBuf::from("historical_silver_price.csv") }

fn default_sales() -> PathBuf { PathBuf::from("state_wise_silver_purchased_kg.csv") }

fn default_geometry() -> PathBuf { PathBuf::from("india_state_geo.json") }

impl Default for DataPaths {
  fn default() -> Self {
    Self {
      prices:   default_prices(),
      sales:    default_sales(),
      geometry: default_geometry(),
    }
  }
}

impl DataPaths {
  /// Re-root every relative path under `dir`. Absolute paths are kept.
  pub fn in_dir(&self, dir: impl AsRef<Path>) -> Self {
    let dir = dir.as_ref();
    Self {
      prices:   dir.join(&self.prices),
      sales:    dir.join(&self.sales),
      geometry: dir.join(&self.geometry),
    }
  }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// The base tables plus the region boundaries, loaded once and never mutated.
///
/// The two CSV tables are required: [`Dataset::load`] fails if either is
/// malformed. The boundary collection is optional: its failure is stored and
/// only surfaces through [`Dataset::choropleth`].
#[derive(Debug, Clone)]
pub struct Dataset {
  prices:  Vec<PriceRecord>,
  sales:   Vec<SalesRecord>,
  regions: Result<Vec<RegionGeometry>, GeoJoinError>,
}

impl Dataset {
  /// Load all three inputs from disk, one after another.
  pub fn load(paths: &DataPaths) -> Result<Self> {
    let prices = load_prices(&paths.prices)?;
    let sales = load_sales(&paths.sales)?;
    let regions = load_geometry(&paths.geometry);
    Ok(Self::from_parts(prices, sales, regions))
  }

  /// Assemble a dataset from already-loaded parts.
  pub fn from_parts(
    prices: Vec<PriceRecord>,
    sales: Vec<SalesRecord>,
    regions: Result<Vec<RegionGeometry>, GeoJoinError>,
  ) -> Self {
    if let Err(e) = &regions {
      tracing::warn!(error = %e, "map panel will be unavailable");
    }
    Self { prices, sales, regions }
  }

  pub fn prices(&self) -> &[PriceRecord] { &self.prices }

  pub fn sales(&self) -> &[SalesRecord] { &self.sales }

  pub fn regions(&self) -> Result<&[RegionGeometry], &GeoJoinError> {
    self.regions.as_deref()
  }

  /// Regions joined with their sales rows, or the reason the map can't be
  /// drawn.
  pub fn choropleth(&self) -> Result<Vec<JoinedRegion<'_>>, GeoJoinError> {
    let regions = self.regions().map_err(Clone::clone)?;
    join_sales_to_geometry(regions, &self.sales)
  }
}
