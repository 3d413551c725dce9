//! Layered runtime settings: defaults, then the TOML file, then
//! `SILVERHUB__*` environment variables.

use std::path::Path;

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::Deserialize;
use silverhub_core::{price::Month, query::ExchangeRate};
use silverhub_data::DataPaths;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
  /// Input file locations.
  #[serde(default)]
  pub data:      DataPaths,
  /// The fixed INR→USD factor used by the calculator.
  #[serde(default)]
  pub currency:  ExchangeRate,
  #[serde(default)]
  pub dashboard: DashboardConfig,
}

/// Initial state of the sales dashboard widgets.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
  /// How many states the bar chart shows.
  #[serde(default = "default_top_n")]
  pub top_n: usize,
  /// Month shown in the monthly price table on startup.
  #[serde(default = "default_month")]
  pub month: Month,
}

fn default_top_n() -> usize { 5 }

fn default_month() -> Month { Month::Jan }

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      top_n: default_top_n(),
      month: default_month(),
    }
  }
}

impl Settings {
  /// Load settings from `path` (if it exists) and the environment.
  ///
  /// Nested keys use a double underscore, e.g.
  /// `SILVERHUB__CURRENCY__INR_TO_USD=0.0119`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let config = Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("SILVERHUB").prefix_separator("__").separator("__"))
      .build()
      .with_context(|| format!("failed to read settings from {}", path.display()))?;

    config
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_bundled_dashboard() {
    let settings = Settings::default();
    assert_eq!(settings.dashboard.top_n, 5);
    assert_eq!(settings.dashboard.month, Month::Jan);
    assert_eq!(settings.currency.inr_to_usd, 0.012);
    assert_eq!(settings.data, DataPaths::default());
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/silverhub.toml")).unwrap();
    assert_eq!(settings.dashboard.top_n, 5);
    assert_eq!(settings.data, DataPaths::default());
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir().join(format!("silverhub-settings-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "[currency]\ninr_to_usd = 0.5\n\n[dashboard]\ntop_n = 3\nmonth = \"Mar\"\n",
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.currency.inr_to_usd, 0.5);
    assert_eq!(settings.dashboard.top_n, 3);
    assert_eq!(settings.dashboard.month, Month::Mar);

    std::fs::remove_file(&path).ok();
  }

  #[test]
  fn unknown_dashboard_month_is_rejected() {
    let path =
      std::env::temp_dir().join(format!("silverhub-bad-month-{}.toml", std::process::id()));
    std::fs::write(&path, "[dashboard]\nmonth = \"January\"\n").unwrap();

    assert!(Settings::load(&path).is_err());

    std::fs::remove_file(&path).ok();
  }
}
