//! Region boundaries and the sales-to-geometry join behind the choropleth.

use std::collections::HashMap;

use geo::{BoundingRect, Coord, MultiPolygon, Rect};

use crate::{GeoJoinError, sales::SalesRecord};

// ─── Geometry ────────────────────────────────────────────────────────────────

/// One named region boundary (a feature of the boundary collection).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
  /// The region name (`ST_NM`), matched exactly against sales states.
  pub name:     String,
  pub boundary: MultiPolygon<f64>,
}

// ─── Join ────────────────────────────────────────────────────────────────────

/// A region paired with one matching sales row. Borrowed from the base
/// tables; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinedRegion<'a> {
  pub region: &'a RegionGeometry,
  pub sales:  &'a SalesRecord,
}

impl JoinedRegion<'_> {
  pub fn name(&self) -> &str { &self.region.name }

  pub fn purchased_kg(&self) -> f64 { self.sales.purchased_kg }
}

/// Inner-join regions and sales on `region.name == sales.state`.
///
/// Rows without a partner on the other side are dropped. Output follows
/// geometry order, and within one region, sales order; a duplicated state
/// yields one joined row per duplicate.
///
/// Returns [`GeoJoinError::EmptyJoin`] when nothing matches.
pub fn join_sales_to_geometry<'a>(
  geometry: &'a [RegionGeometry],
  sales: &'a [SalesRecord],
) -> Result<Vec<JoinedRegion<'a>>, GeoJoinError> {
  let mut by_state: HashMap<&str, Vec<&SalesRecord>> = HashMap::new();
  for record in sales {
    by_state.entry(record.state.as_str()).or_default().push(record);
  }

  let joined: Vec<JoinedRegion<'a>> = geometry
    .iter()
    .flat_map(|region| {
      by_state
        .get(region.name.as_str())
        .into_iter()
        .flatten()
        .map(move |&sales| JoinedRegion { region, sales })
    })
    .collect();

  if joined.is_empty() {
    return Err(GeoJoinError::EmptyJoin);
  }
  Ok(joined)
}

// ─── Rendering helpers ───────────────────────────────────────────────────────

/// The bounding rectangle enclosing every joined region, or `None` when no
/// region has any coordinates.
pub fn bounds(joined: &[JoinedRegion<'_>]) -> Option<Rect<f64>> {
  joined
    .iter()
    .filter_map(|j| j.region.boundary.bounding_rect())
    .reduce(|acc, r| {
      Rect::new(
        Coord { x: acc.min().x.min(r.min().x), y: acc.min().y.min(r.min().y) },
        Coord { x: acc.max().x.max(r.max().x), y: acc.max().y.max(r.max().y) },
      )
    })
}

/// Map `value` in `[min, max]` onto one of `levels` discrete shades,
/// `0` being the lightest.
///
/// Values outside the range are clamped. A degenerate range puts everything
/// in the darkest shade.
pub fn shade_level(value: f64, min: f64, max: f64, levels: usize) -> usize {
  if levels == 0 {
    return 0;
  }
  let top = levels - 1;
  if max <= min || !value.is_finite() {
    return top;
  }
  let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
  ((t * levels as f64) as usize).min(top)
}

#[cfg(test)]
mod tests {
  use geo::polygon;

  use super::*;

  fn square(name: &str, x0: f64, y0: f64, side: f64) -> RegionGeometry {
    let poly = polygon![
      (x: x0, y: y0),
      (x: x0 + side, y: y0),
      (x: x0 + side, y: y0 + side),
      (x: x0, y: y0 + side),
      (x: x0, y: y0),
    ];
    RegionGeometry { name: name.into(), boundary: MultiPolygon(vec![poly]) }
  }

  #[test]
  fn unmatched_state_is_dropped_and_matches_survive() {
    let geometry = vec![square("Kerala", 0.0, 0.0, 1.0), square("Goa", 2.0, 0.0, 1.0)];
    let sales = vec![
      SalesRecord::new("Goa", 120.0),
      SalesRecord::new("Atlantis", 999.0),
      SalesRecord::new("Kerala", 80.0),
    ];

    let joined = join_sales_to_geometry(&geometry, &sales).unwrap();
    let names: Vec<_> = joined.iter().map(|j| (j.name(), j.purchased_kg())).collect();
    assert_eq!(names, vec![("Kerala", 80.0), ("Goa", 120.0)]);
  }

  #[test]
  fn region_without_sales_is_dropped() {
    let geometry = vec![square("Kerala", 0.0, 0.0, 1.0), square("Goa", 2.0, 0.0, 1.0)];
    let sales = vec![SalesRecord::new("Goa", 120.0)];

    let joined = join_sales_to_geometry(&geometry, &sales).unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].name(), "Goa");
  }

  #[test]
  fn names_compare_case_sensitively() {
    let geometry = vec![square("Goa", 0.0, 0.0, 1.0)];
    let sales = vec![SalesRecord::new("goa", 1.0)];
    assert_eq!(join_sales_to_geometry(&geometry, &sales), Err(GeoJoinError::EmptyJoin));
  }

  #[test]
  fn duplicate_states_each_produce_a_row() {
    let geometry = vec![square("Goa", 0.0, 0.0, 1.0)];
    let sales = vec![SalesRecord::new("Goa", 1.0), SalesRecord::new("Goa", 2.0)];

    let joined = join_sales_to_geometry(&geometry, &sales).unwrap();
    let kg: Vec<_> = joined.iter().map(JoinedRegion::purchased_kg).collect();
    assert_eq!(kg, vec![1.0, 2.0]);
  }

  #[test]
  fn empty_inputs_are_an_empty_join() {
    assert_eq!(join_sales_to_geometry(&[], &[]), Err(GeoJoinError::EmptyJoin));
  }

  #[test]
  fn bounds_cover_all_regions() {
    let geometry = vec![square("A", 0.0, 0.0, 1.0), square("B", 3.0, -2.0, 1.0)];
    let sales = vec![SalesRecord::new("A", 1.0), SalesRecord::new("B", 1.0)];
    let joined = join_sales_to_geometry(&geometry, &sales).unwrap();

    let rect = bounds(&joined).unwrap();
    assert_eq!(rect.min(), Coord { x: 0.0, y: -2.0 });
    assert_eq!(rect.max(), Coord { x: 4.0, y: 1.0 });
    assert!(bounds(&[]).is_none());
  }

  #[test]
  fn shade_levels_span_the_range() {
    assert_eq!(shade_level(0.0, 0.0, 100.0, 4), 0);
    assert_eq!(shade_level(49.0, 0.0, 100.0, 4), 1);
    assert_eq!(shade_level(100.0, 0.0, 100.0, 4), 3);
    assert_eq!(shade_level(500.0, 0.0, 100.0, 4), 3);
    assert_eq!(shade_level(-5.0, 0.0, 100.0, 4), 0);
    assert_eq!(shade_level(7.0, 7.0, 7.0, 4), 3);
    assert_eq!(shade_level(7.0, 0.0, 10.0, 0), 0);
  }
}
