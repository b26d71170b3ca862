//! podium server binary.
//!
//! Reads `podium.toml` (or the path specified with `--config`) layered under
//! `PODIUM_*` environment variables, loads the two source tables, and serves
//! the dashboard API over HTTP.
//!
//! ```sh
//! PODIUM_MEDALS_PATH=data/medals.csv \
//! PODIUM_PREDICTIONS_PATH=data/predictions.csv \
//!   cargo run -p podium-server --bin server
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use podium_server::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Podium medal dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "podium.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("PODIUM")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in source paths.
  server_cfg.medals_path = expand_tilde(&server_cfg.medals_path);
  server_cfg.predictions_path = expand_tilde(&server_cfg.predictions_path);

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let state = AppState::from_config(server_cfg);

  // Read both tables before accepting requests; a bad file only degrades
  // the panels that use it.
  let dataset = state.dataset.clone();
  tokio::task::spawn_blocking(move || dataset.preload())
    .await
    .context("preload task failed")?;

  let app = podium_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
