//! Handler for `GET /controls`: the domains of the year and country
//! selectors, both derived from the medal table.

use axum::{
  extract::State,
  http::HeaderMap,
  response::Response,
};
use podium_core::{
  dataset::Dataset,
  filter::{country_choices, years},
};
use serde::Serialize;

use crate::{AppState, etag::cached};

#[derive(Debug, Serialize)]
pub struct Controls {
  /// Descending; the first entry is the default.
  pub years:        Vec<i32>,
  pub default_year: Option<i32>,
  /// `"All"` followed by the most frequent countries.
  pub countries:    Vec<String>,
  pub notice:       Option<String>,
}

/// `GET /controls`
pub async fn handler<D: Dataset>(
  State(state): State<AppState<D>>,
  headers: HeaderMap,
) -> Response {
  let medals = state.dataset.medals();
  cached(&headers, &state.dataset.revision(), || {
    let years = years(&medals.rows);
    Controls {
      default_year: years.first().copied(),
      countries: country_choices(&medals.rows, state.settings.country_choices),
      notice: medals.error.clone(),
      years,
    }
  })
}
