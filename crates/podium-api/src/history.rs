//! Handler for `GET /history`: the program-history tree.
//!
//! Always built from the whole medal table; the year and country selectors
//! do not apply.

use axum::{
  extract::State,
  http::HeaderMap,
  response::Response,
};
use podium_core::{
  build::{ProgramHistory, program_history},
  dataset::Dataset,
};
use serde::Serialize;

use crate::{AppState, etag::cached, notice};

pub const NO_HISTORY: &str = "No program history available.";

#[derive(Debug, Serialize)]
pub struct HistoryPanel {
  #[serde(flatten)]
  pub history: ProgramHistory,
  pub notice:  Option<String>,
}

/// `GET /history`
pub async fn handler<D: Dataset>(
  State(state): State<AppState<D>>,
  headers: HeaderMap,
) -> Response {
  let medals = state.dataset.medals();
  let settings = &state.settings;
  cached(&headers, &state.dataset.revision(), || {
    let history = program_history(
      &medals.rows,
      settings.recency_editions,
      &settings.history_root,
    );
    HistoryPanel {
      notice: notice(&medals, history.events.is_empty(), NO_HISTORY),
      history,
    }
  })
}
