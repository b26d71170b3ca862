//! JSON REST API for the Podium dashboard.
//!
//! Exposes an axum [`Router`] backed by any [`Dataset`]. Every request
//! recomputes its panel from the shared, immutable tables; the only
//! per-user state, the prediction selection, travels in the request body.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", podium_api::api_router(dataset.clone(), settings))
//! ```

pub mod controls;
pub mod error;
pub mod etag;
pub mod history;
pub mod medals;
pub mod predictions;
pub mod status;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use podium_core::{
  dataset::{Dataset, Loaded},
  settings::DashboardSettings,
};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct AppState<D> {
  pub dataset:  Arc<D>,
  pub settings: Arc<DashboardSettings>,
}

impl<D> Clone for AppState<D> {
  fn clone(&self) -> Self {
    Self {
      dataset:  Arc::clone(&self.dataset),
      settings: Arc::clone(&self.settings),
    }
  }
}

/// Build a fully-materialised API router for `dataset`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<D>(dataset: Arc<D>, settings: DashboardSettings) -> Router<()>
where
  D: Dataset + 'static,
{
  let state = AppState {
    dataset,
    settings: Arc::new(settings),
  };
  Router::new()
    .route("/status", get(status::handler::<D>))
    .route("/controls", get(controls::handler::<D>))
    // Historical medals
    .route("/medals/treemap", get(medals::treemap::<D>))
    .route("/medals/top", get(medals::top::<D>))
    .route("/medals/trend", get(medals::trend::<D>))
    .route("/medals/fact", get(medals::fact::<D>))
    .route("/history", get(history::handler::<D>))
    // Predictions
    .route("/predictions/sunburst", get(predictions::sunburst::<D>))
    .route("/predictions/sports", get(predictions::sports::<D>))
    .route("/predictions/selection", post(predictions::selection::<D>))
    .with_state(state)
}

/// The message a panel shows instead of data: the source's load error if
/// it failed to load, otherwise `empty` when the panel has nothing to show.
pub(crate) fn notice<T>(
  loaded: &Loaded<T>,
  is_empty: bool,
  empty: &str,
) -> Option<String> {
  match &loaded.error {
    Some(error) => Some(error.clone()),
    None if is_empty => Some(empty.to_string()),
    None => None,
  }
}
