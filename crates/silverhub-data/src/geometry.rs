//! Reader for the region boundary collection (GeoJSON `FeatureCollection`
//! with an `ST_NM` name property per feature).
//!
//! Failures here are [`GeoJoinError::GeometryUnavailable`], not
//! [`DataFormatError`](crate::DataFormatError): the boundary file only feeds
//! the map panel, so a bad file must not stop the rest of the dashboard.

use std::path::Path;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};
use silverhub_core::{GeoJoinError, region::RegionGeometry};

/// The feature property holding the region name.
pub const NAME_PROPERTY: &str = "ST_NM";

// ─── Wire shapes ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FeatureCollection {
  #[serde(rename = "type")]
  kind:     String,
  features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
  #[serde(default)]
  properties: Option<Map<String, Value>>,
  #[serde(default)]
  geometry:   Option<RawGeometry>,
}

/// Positions are kept as `Vec<f64>` so that altitude (or any extra
/// dimension) is tolerated and ignored.
#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum RawGeometry {
  Polygon(Vec<Vec<Vec<f64>>>),
  MultiPolygon(Vec<Vec<Vec<Vec<f64>>>>),
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Read and parse the boundary file at `path`.
pub fn load_geometry(path: impl AsRef<Path>) -> Result<Vec<RegionGeometry>, GeoJoinError> {
  let path = path.as_ref();
  let raw = std::fs::read_to_string(path).map_err(|e| {
    GeoJoinError::GeometryUnavailable(format!("failed to read {}: {e}", path.display()))
  })?;
  let regions = parse_geometry(&raw)?;
  tracing::info!(regions = regions.len(), path = %path.display(), "loaded region geometry");
  Ok(regions)
}

/// Parse a boundary collection from its JSON text.
///
/// Features without a string `ST_NM` or without a geometry are skipped with
/// a warning, mirroring how the join would drop them anyway.
pub fn parse_geometry(raw: &str) -> Result<Vec<RegionGeometry>, GeoJoinError> {
  let collection: FeatureCollection = serde_json::from_str(raw)
    .map_err(|e| GeoJoinError::GeometryUnavailable(format!("invalid boundary collection: {e}")))?;

  if collection.kind != "FeatureCollection" {
    return Err(GeoJoinError::GeometryUnavailable(format!(
      "expected a FeatureCollection, found {:?}",
      collection.kind
    )));
  }

  let mut regions = Vec::with_capacity(collection.features.len());
  for (index, feature) in collection.features.into_iter().enumerate() {
    let name = feature
      .properties
      .as_ref()
      .and_then(|p| p.get(NAME_PROPERTY))
      .and_then(Value::as_str)
      .map(str::to_owned);

    let (Some(name), Some(geometry)) = (name, feature.geometry) else {
      tracing::warn!(index, "skipping boundary feature without a name or geometry");
      continue;
    };

    let boundary = to_multi_polygon(geometry)
      .map_err(|reason| GeoJoinError::GeometryUnavailable(format!("region {name:?}: {reason}")))?;
    regions.push(RegionGeometry { name, boundary });
  }

  Ok(regions)
}

// ─── Conversion ──────────────────────────────────────────────────────────────

fn to_multi_polygon(raw: RawGeometry) -> Result<MultiPolygon<f64>, String> {
  let polygons = match raw {
    RawGeometry::Polygon(rings) => vec![to_polygon(rings)?],
    RawGeometry::MultiPolygon(parts) => {
      parts.into_iter().map(to_polygon).collect::<Result<_, _>>()?
    }
  };
  Ok(MultiPolygon(polygons))
}

/// The first ring is the exterior; the rest are holes.
fn to_polygon(rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon<f64>, String> {
  let mut rings = rings.into_iter().map(to_ring);
  let exterior = rings.next().ok_or("polygon has no rings")??;
  let interiors = rings.collect::<Result<Vec<_>, _>>()?;
  Ok(Polygon::new(exterior, interiors))
}

fn to_ring(positions: Vec<Vec<f64>>) -> Result<LineString<f64>, String> {
  positions
    .into_iter()
    .map(|p| match p.as_slice() {
      [x, y, ..] => Ok(Coord { x: *x, y: *y }),
      _ => Err(format!("position has {} coordinate(s), need at least 2", p.len())),
    })
    .collect::<Result<Vec<_>, _>>()
    .map(LineString::new)
}
