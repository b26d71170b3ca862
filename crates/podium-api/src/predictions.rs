//! Handlers for the prediction panels.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/predictions/sunburst` | sport → athlete hierarchy |
//! | `GET`  | `/predictions/sports` | per-sport totals |
//! | `POST` | `/predictions/selection` | Body: `{"state": …, "click": …}` |
//!
//! The selection endpoint is stateless: the client sends back the state it
//! received last time together with the new click, and gets the next state
//! and its detail panel.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::HeaderMap,
  response::Response,
};
use podium_core::{
  build::sunburst as build_sunburst,
  dataset::Dataset,
  hierarchy::Hierarchy,
  prediction::{SportAggregate, sport_aggregates},
  selection::{Click, DetailPanel, SelectionState},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, etag::cached, notice};

pub const NO_PREDICTIONS: &str = "No prediction data available.";

// ─── Sunburst ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SunburstPanel {
  pub hierarchy: Hierarchy,
  pub notice:    Option<String>,
}

/// `GET /predictions/sunburst`
pub async fn sunburst<D: Dataset>(
  State(state): State<AppState<D>>,
  headers: HeaderMap,
) -> Response {
  let predictions = state.dataset.predictions();
  cached(&headers, &state.dataset.revision(), || SunburstPanel {
    hierarchy: build_sunburst(&predictions.rows, &state.settings.prediction_root),
    notice:    notice(&predictions, predictions.rows.is_empty(), NO_PREDICTIONS),
  })
}

// ─── Sports ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SportsPanel {
  pub sports: Vec<SportAggregate>,
  pub notice: Option<String>,
}

/// `GET /predictions/sports`
pub async fn sports<D: Dataset>(
  State(state): State<AppState<D>>,
  headers: HeaderMap,
) -> Response {
  let predictions = state.dataset.predictions();
  cached(&headers, &state.dataset.revision(), || SportsPanel {
    sports: sport_aggregates(&predictions.rows),
    notice: notice(&predictions, predictions.rows.is_empty(), NO_PREDICTIONS),
  })
}

// ─── Selection ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
  /// The state returned by the previous call; `default` when absent.
  #[serde(default)]
  pub state: SelectionState,
  /// Absent to just render the panel for `state`.
  pub click: Option<Click>,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
  pub state:  SelectionState,
  pub panel:  Option<DetailPanel>,
  pub notice: Option<String>,
}

/// `POST /predictions/selection`
pub async fn selection<D: Dataset>(
  State(state): State<AppState<D>>,
  body: Result<Json<SelectionRequest>, JsonRejection>,
) -> Result<Json<SelectionResponse>, ApiError> {
  let Json(request) = body?;
  let predictions = state.dataset.predictions();
  let table = predictions.rows.as_slice();

  let next = match &request.click {
    Some(click) => {
      let next = request.state.clone().apply(click, table);
      if next == request.state {
        tracing::debug!(?click, "selection unchanged");
      }
      next
    }
    None => request.state,
  };

  let panel = next.panel(table);
  Ok(Json(SelectionResponse {
    notice: notice(&predictions, panel.is_none(), NO_PREDICTIONS),
    state: next,
    panel,
  }))
}
