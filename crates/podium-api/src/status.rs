//! Handler for `GET /status`: dataset revision, row counts, load errors.

use axum::{
  Json,
  extract::State,
};
use podium_core::dataset::{Dataset, Loaded};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TableStatus {
  pub rows:  usize,
  pub error: Option<String>,
}

impl<T> From<&Loaded<T>> for TableStatus {
  fn from(loaded: &Loaded<T>) -> Self {
    Self {
      rows:  loaded.rows.len(),
      error: loaded.error.clone(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct Status {
  pub revision:    String,
  pub medals:      TableStatus,
  pub predictions: TableStatus,
}

/// `GET /status`
pub async fn handler<D: Dataset>(State(state): State<AppState<D>>) -> Json<Status> {
  let dataset = &state.dataset;
  Json(Status {
    revision:    dataset.revision(),
    medals:      TableStatus::from(dataset.medals().as_ref()),
    predictions: TableStatus::from(dataset.predictions().as_ref()),
  })
}
