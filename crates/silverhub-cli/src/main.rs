//! `silverhub`: terminal dashboard over the bundled silver datasets.
//!
//! # Usage
//!
//! ```
//! silverhub --data-dir ./data
//! silverhub --config silverhub.toml --log-file /tmp/silverhub.log
//! ```

mod app;
mod settings;
mod ui;

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use silverhub_data::{
  DataPaths, Dataset, geometry::load_geometry, prices::load_prices, sales::load_sales,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "silverhub", version, about = "Silver price calculator and sales dashboard")]
struct Args {
  /// Path to a TOML settings file.
  #[arg(short, long, value_name = "FILE", default_value = "silverhub.toml")]
  config: PathBuf,

  /// Directory holding the price, sales and boundary files.
  #[arg(long, env = "SILVERHUB_DATA_DIR", value_name = "DIR")]
  data_dir: Option<PathBuf>,

  /// Where log output goes; the terminal itself belongs to the UI.
  #[arg(long, env = "SILVERHUB_LOG", value_name = "FILE", default_value = "silverhub.log")]
  log_file: PathBuf,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  init_tracing(&args.log_file)?;

  let settings = Settings::load(&args.config)?;
  let paths = match &args.data_dir {
    Some(dir) => settings.data.in_dir(dir),
    None => settings.data.clone(),
  };

  // Both tables must load before any view is shown.
  let dataset = Arc::new(load_dataset(paths).await?);
  let mut app = App::new(dataset, &settings);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn init_tracing(log_file: &Path) -> Result<()> {
  let file = File::create(log_file)
    .with_context(|| format!("creating log file {}", log_file.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

/// Read the three inputs concurrently. The loaders share nothing, so each
/// runs on its own blocking task.
async fn load_dataset(paths: DataPaths) -> Result<Dataset> {
  let DataPaths { prices, sales, geometry } = paths;

  let (prices, sales, regions) = tokio::join!(
    tokio::task::spawn_blocking(move || load_prices(prices)),
    tokio::task::spawn_blocking(move || load_sales(sales)),
    tokio::task::spawn_blocking(move || load_geometry(geometry)),
  );

  let prices = prices
    .context("price loader task failed")?
    .context("loading price table")?;
  let sales = sales
    .context("sales loader task failed")?
    .context("loading sales table")?;
  let regions = regions.context("geometry loader task failed")?;

  Ok(Dataset::from_parts(prices, sales, regions))
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key)
    {
      break;
    }
  }

  tracing::info!("exiting");
  Ok(())
}
