//! Loader tests against in-memory inputs and a scratch directory.

use std::{fs, path::PathBuf};

use silverhub_core::{
  GeoJoinError,
  price::Month,
  query::{PriceRange, filter_by_price_range},
};

use crate::{
  DataFormatError, DataPaths, Dataset,
  geometry::parse_geometry,
  prices::read_prices,
  sales::{duplicate_states, read_sales},
};

const PRICES: &str = "\
Year,Month,Silver_Price_INR_per_kg
2020,Jan,18000
2020,Feb,25000.5
2020,Mar,32000
";

const SALES: &str = "\
State,Silver_Purchased_kg
Kerala,1200
Goa,300.5
Punjab,800
";

const GEOMETRY: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "ST_NM": "Kerala" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[76.0, 8.0], [77.0, 8.0], [77.0, 9.0], [76.0, 8.0]]]
      }
    },
    {
      "type": "Feature",
      "properties": { "ST_NM": "Goa" },
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [
          [[[73.7, 15.0, 0.0], [74.3, 15.0, 0.0], [74.3, 15.8, 0.0], [73.7, 15.0, 0.0]]],
          [[[73.0, 14.0], [73.1, 14.0], [73.1, 14.1], [73.0, 14.0]]]
        ]
      }
    },
    {
      "type": "Feature",
      "properties": { "ST_NM": "Ladakh" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[77.0, 34.0], [78.0, 34.0], [78.0, 35.0], [77.0, 34.0]]]
      }
    }
  ]
}"#;

/// A fresh, empty directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(format!("silverhub-{}-{name}", std::process::id()));
  let _ = fs::remove_dir_all(&dir);
  fs::create_dir_all(&dir).expect("create scratch dir");
  dir
}

// ─── Prices ──────────────────────────────────────────────────────────────────

#[test]
fn prices_load_in_file_order_with_dates() {
  let records = read_prices(PRICES.as_bytes(), "prices.csv").unwrap();
  assert_eq!(records.len(), 3);

  let months: Vec<_> = records.iter().map(|r| r.month).collect();
  assert_eq!(months, vec![Month::Jan, Month::Feb, Month::Mar]);
  assert_eq!(records[1].price_inr_per_kg, 25000.5);
  assert_eq!(records[1].date.to_string(), "2020-02-01");
}

#[test]
fn prices_accept_reordered_and_extra_columns() {
  let csv = "Silver_Price_INR_per_kg,Note,Month,Year\n21000, ok , Apr ,2021\n";
  let records = read_prices(csv.as_bytes(), "prices.csv").unwrap();
  assert_eq!(records[0].year, 2021);
  assert_eq!(records[0].month, Month::Apr);
}

#[test]
fn show_all_after_load_is_the_full_table() {
  let records = read_prices(PRICES.as_bytes(), "prices.csv").unwrap();
  let all = filter_by_price_range(&records, PriceRange::All);
  assert_eq!(all.len(), records.len());
  assert!(all.iter().zip(&records).all(|(a, b)| *a == b));
}

#[test]
fn prices_missing_column_is_reported() {
  let csv = "Year,Month\n2020,Jan\n";
  let err = read_prices(csv.as_bytes(), "prices.csv").unwrap_err();
  assert!(matches!(
    err,
    DataFormatError::MissingColumn { column: "Silver_Price_INR_per_kg", .. }
  ));
}

#[test]
fn prices_unknown_month_is_reported_with_row() {
  let csv = "Year,Month,Silver_Price_INR_per_kg\n2020,Jan,1\n2020,Sept,2\n";
  let err = read_prices(csv.as_bytes(), "prices.csv").unwrap_err();
  match err {
    DataFormatError::InvalidValue { row, column, value, .. } => {
      assert_eq!(row, 2);
      assert_eq!(column, "Month");
      assert_eq!(value, "Sept");
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn prices_non_numeric_fields_are_rejected() {
  let bad_year = "Year,Month,Silver_Price_INR_per_kg\ntwenty,Jan,1\n";
  assert!(matches!(
    read_prices(bad_year.as_bytes(), "p").unwrap_err(),
    DataFormatError::InvalidValue { column: "Year", .. }
  ));

  let bad_price = "Year,Month,Silver_Price_INR_per_kg\n2020,Jan,lots\n";
  assert!(matches!(
    read_prices(bad_price.as_bytes(), "p").unwrap_err(),
    DataFormatError::InvalidValue { column: "Silver_Price_INR_per_kg", .. }
  ));

  let negative = "Year,Month,Silver_Price_INR_per_kg\n2020,Jan,-5\n";
  assert!(matches!(
    read_prices(negative.as_bytes(), "p").unwrap_err(),
    DataFormatError::InvalidValue { column: "Silver_Price_INR_per_kg", .. }
  ));
}

// ─── Sales ───────────────────────────────────────────────────────────────────

#[test]
fn sales_load_in_file_order() {
  let records = read_sales(SALES.as_bytes(), "sales.csv").unwrap();
  let states: Vec<_> = records.iter().map(|r| r.state.as_str()).collect();
  assert_eq!(states, vec!["Kerala", "Goa", "Punjab"]);
  assert_eq!(records[1].purchased_kg, 300.5);
}

#[test]
fn sales_duplicates_are_kept() {
  let csv = "State,Silver_Purchased_kg\nGoa,1\nKerala,2\nGoa,3\nGoa,4\n";
  let records = read_sales(csv.as_bytes(), "sales.csv").unwrap();
  assert_eq!(records.len(), 4);
  assert_eq!(duplicate_states(&records), vec!["Goa"]);
}

#[test]
fn sales_errors() {
  let missing = "Region,Silver_Purchased_kg\nGoa,1\n";
  assert!(matches!(
    read_sales(missing.as_bytes(), "s").unwrap_err(),
    DataFormatError::MissingColumn { column: "State", .. }
  ));

  let empty_state = "State,Silver_Purchased_kg\n,1\n";
  assert!(matches!(
    read_sales(empty_state.as_bytes(), "s").unwrap_err(),
    DataFormatError::InvalidValue { column: "State", row: 1, .. }
  ));

  let bad_kg = "State,Silver_Purchased_kg\nGoa,heavy\n";
  assert!(matches!(
    read_sales(bad_kg.as_bytes(), "s").unwrap_err(),
    DataFormatError::InvalidValue { column: "Silver_Purchased_kg", .. }
  ));
}

#[test]
fn sales_missing_kg_column_is_reported() {
  let csv = "State,Silver_Purchased_tonnes\nGoa,1\n";
  assert!(matches!(
    read_sales(csv.as_bytes(), "s").unwrap_err(),
    DataFormatError::MissingColumn { column: "Silver_Purchased_kg", .. }
  ));
}

#[test]
fn sales_negative_kg_is_rejected_with_row() {
  let csv = "State,Silver_Purchased_kg\nGoa,1\nKerala,-3\n";
  match read_sales(csv.as_bytes(), "s").unwrap_err() {
    DataFormatError::InvalidValue { column, row, value, reason, .. } => {
      assert_eq!(column, "Silver_Purchased_kg");
      assert_eq!(row, 2);
      assert_eq!(value, "-3");
      assert!(reason.contains("negative"));
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

// ─── Geometry ────────────────────────────────────────────────────────────────

#[test]
fn geometry_parses_polygons_and_multipolygons() {
  let regions = parse_geometry(GEOMETRY).unwrap();
  let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, vec!["Kerala", "Goa", "Ladakh"]);
  assert_eq!(regions[0].boundary.0.len(), 1);
  assert_eq!(regions[1].boundary.0.len(), 2);
}

#[test]
fn geometry_skips_unnamed_features() {
  let raw = r#"{"type":"FeatureCollection","features":[
    {"type":"Feature","properties":{"name":"x"},
     "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[0,1],[0,0]]]}},
    {"type":"Feature","properties":{"ST_NM":"Goa"},"geometry":null}
  ]}"#;
  assert!(parse_geometry(raw).unwrap().is_empty());
}

#[test]
fn geometry_failures_are_unavailable() {
  for raw in [
    "not json",
    r#"{"type":"Feature","features":[]}"#,
    r#"{"type":"FeatureCollection","features":[{"properties":{"ST_NM":"A"},
       "geometry":{"type":"Point","coordinates":[0,0]}}]}"#,
    r#"{"type":"FeatureCollection","features":[{"properties":{"ST_NM":"A"},
       "geometry":{"type":"Polygon","coordinates":[[[0]]]}}]}"#,
    r#"{"type":"FeatureCollection","features":[{"properties":{"ST_NM":"A"},
       "geometry":{"type":"Polygon","coordinates":[]}}]}"#,
  ] {
    assert!(
      matches!(parse_geometry(raw), Err(GeoJoinError::GeometryUnavailable(_))),
      "expected failure for {raw}"
    );
  }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

#[test]
fn dataset_loads_from_directory_and_joins() {
  let dir = scratch_dir("full");
  fs::write(dir.join("historical_silver_price.csv"), PRICES).unwrap();
  fs::write(dir.join("state_wise_silver_purchased_kg.csv"), SALES).unwrap();
  fs::write(dir.join("india_state_geo.json"), GEOMETRY).unwrap();

  let dataset = Dataset::load(&DataPaths::default().in_dir(&dir)).unwrap();
  assert_eq!(dataset.prices().len(), 3);
  assert_eq!(dataset.sales().len(), 3);

  // Punjab has no boundary and Ladakh has no sales: both drop out.
  let joined = dataset.choropleth().unwrap();
  let names: Vec<_> = joined.iter().map(|j| j.name()).collect();
  assert_eq!(names, vec!["Kerala", "Goa"]);

  fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_geometry_only_degrades_the_map() {
  let dir = scratch_dir("nogeo");
  fs::write(dir.join("historical_silver_price.csv"), PRICES).unwrap();
  fs::write(dir.join("state_wise_silver_purchased_kg.csv"), SALES).unwrap();

  let dataset = Dataset::load(&DataPaths::default().in_dir(&dir)).unwrap();
  assert_eq!(dataset.prices().len(), 3);
  assert!(matches!(dataset.choropleth(), Err(GeoJoinError::GeometryUnavailable(_))));
  assert!(dataset.regions().is_err());

  fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_price_table_fails_startup() {
  let dir = scratch_dir("noprices");
  fs::write(dir.join("state_wise_silver_purchased_kg.csv"), SALES).unwrap();

  let err = Dataset::load(&DataPaths::default().in_dir(&dir)).unwrap_err();
  assert!(matches!(err, DataFormatError::Io { .. }));

  fs::remove_dir_all(&dir).ok();
}

#[test]
fn in_dir_keeps_absolute_paths() {
  let paths = DataPaths {
    prices:   PathBuf::from("/abs/prices.csv"),
    ..DataPaths::default()
  };
  let rooted = paths.in_dir("/data");
  assert_eq!(rooted.prices, PathBuf::from("/abs/prices.csv"));
  assert_eq!(rooted.sales, PathBuf::from("/data/state_wise_silver_purchased_kg.csv"));
}
