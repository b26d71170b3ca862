//! HTTP server for the Podium dashboard.
//!
//! Mounts the JSON API from [`podium_api`] over a [`FileDataset`] and adds
//! request tracing.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use podium_cache::FileDataset;
use podium_core::{dataset::Dataset, settings::DashboardSettings};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `podium.toml` and
/// `PODIUM_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  pub medals_path:      PathBuf,
  pub predictions_path: PathBuf,
  #[serde(default)]
  pub dashboard:        DashboardSettings,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8501 }

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the router needs.
pub struct AppState<D: Dataset> {
  pub dataset: Arc<D>,
  pub config:  Arc<ServerConfig>,
}

impl<D: Dataset> Clone for AppState<D> {
  fn clone(&self) -> Self {
    Self {
      dataset: Arc::clone(&self.dataset),
      config:  Arc::clone(&self.config),
    }
  }
}

impl AppState<FileDataset> {
  /// State over the source files named in `config`. Nothing is read yet.
  pub fn from_config(config: ServerConfig) -> Self {
    let dataset = FileDataset::new(&config.medals_path, &config.predictions_path);
    Self {
      dataset: Arc::new(dataset),
      config:  Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the dashboard server.
pub fn router<D>(state: AppState<D>) -> Router
where
  D: Dataset + 'static,
{
  Router::new()
    .nest(
      "/api",
      podium_api::api_router(state.dataset, state.config.dashboard.clone()),
    )
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
