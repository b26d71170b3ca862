//! Handlers for the historical medal panels.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/medals/treemap` | `?year=&country=` |
//! | `GET`  | `/medals/top` | `?year=&country=&limit=` |
//! | `GET`  | `/medals/trend` | `?year=&country=` |
//! | `GET`  | `/medals/fact` | `?year=&country=`, random, never cached |
//!
//! `year` defaults to the latest year in the data and `country` to `All`.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
  http::HeaderMap,
  response::{IntoResponse, Response},
};
use podium_core::{
  aggregate::{
    EntityTotal, GroupKey, TrendPoint, ValueKey, default_trend_target,
    top_entities, trend_series,
  },
  build::{Treemap, medal_hierarchy},
  dataset::Dataset,
  filter::{CountryFilter, filter, latest_year},
  record::MedalRecord,
};
use rand::seq::SliceRandom;
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, etag::cached, notice};

pub const NO_MEDAL_DATA: &str = "No medal data for the selected filters.";
pub const NO_TREND_DATA: &str = "No data available for trend analysis.";

// ─── Scope ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MedalParams {
  pub year:    Option<i32>,
  #[serde(default)]
  pub country: CountryFilter,
  pub limit:   Option<usize>,
}

/// The year actually shown and the rows it selects.
struct Scope<'a> {
  year: Option<i32>,
  rows: Vec<&'a MedalRecord>,
}

impl<'a> Scope<'a> {
  fn of(table: &'a [MedalRecord], params: &MedalParams) -> Self {
    let year = params.year.or_else(|| latest_year(table));
    let rows = year
      .map(|y| filter(table, y, &params.country))
      .unwrap_or_default();
    Self { year, rows }
  }
}

// ─── Treemap ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TreemapPanel {
  pub year:    Option<i32>,
  pub country: CountryFilter,
  #[serde(flatten)]
  pub treemap: Treemap,
  pub notice:  Option<String>,
}

/// `GET /medals/treemap`
pub async fn treemap<D: Dataset>(
  State(state): State<AppState<D>>,
  headers: HeaderMap,
  params: Result<Query<MedalParams>, QueryRejection>,
) -> Result<Response, ApiError> {
  let Query(params) = params?;
  let medals = state.dataset.medals();
  Ok(cached(&headers, &state.dataset.revision(), || {
    let scope = Scope::of(&medals.rows, &params);
    TreemapPanel {
      year:    scope.year,
      country: params.country.clone(),
      notice:  notice(&medals, scope.rows.is_empty(), NO_MEDAL_DATA),
      treemap: medal_hierarchy(
        scope.rows.iter().copied(),
        &params.country,
        state.settings.treemap_depth,
      ),
    }
  }))
}

// ─── Top nations ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TopPanel {
  pub year:    Option<i32>,
  pub nations: Vec<EntityTotal>,
  pub notice:  Option<String>,
}

/// `GET /medals/top`
pub async fn top<D: Dataset>(
  State(state): State<AppState<D>>,
  headers: HeaderMap,
  params: Result<Query<MedalParams>, QueryRejection>,
) -> Result<Response, ApiError> {
  let Query(params) = params?;
  let medals = state.dataset.medals();
  let limit = params.limit.unwrap_or(state.settings.top_nations);
  Ok(cached(&headers, &state.dataset.revision(), || {
    let scope = Scope::of(&medals.rows, &params);
    TopPanel {
      year:    scope.year,
      notice:  notice(&medals, scope.rows.is_empty(), NO_MEDAL_DATA),
      nations: top_entities(
        scope.rows.iter().copied(),
        GroupKey::Country,
        ValueKey::Score,
        limit,
      ),
    }
  }))
}

// ─── Trend ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TrendPanel {
  pub year:   Option<i32>,
  /// The country whose history is plotted.
  pub entity: Option<String>,
  pub title:  String,
  pub points: Vec<TrendPoint>,
  pub notice: Option<String>,
}

/// Pick the plotted country and the chart title. With no country selected
/// the top nation of the shown year is plotted.
fn trend_target(scope: &Scope<'_>, country: &CountryFilter) -> (Option<String>, String) {
  if let Some(name) = country.as_country() {
    return (Some(name.to_string()), name.to_string());
  }
  match (scope.year, default_trend_target(scope.rows.iter().copied())) {
    (Some(year), Some(top)) => {
      let suffix = format!("Top Nation of {year}: {top}");
      (Some(top), suffix)
    }
    _ => (None, "No Data".to_string()),
  }
}

/// `GET /medals/trend`
pub async fn trend<D: Dataset>(
  State(state): State<AppState<D>>,
  headers: HeaderMap,
  params: Result<Query<MedalParams>, QueryRejection>,
) -> Result<Response, ApiError> {
  let Query(params) = params?;
  let medals = state.dataset.medals();
  Ok(cached(&headers, &state.dataset.revision(), || {
    let scope = Scope::of(&medals.rows, &params);
    let (entity, suffix) = trend_target(&scope, &params.country);
    let points = entity
      .as_deref()
      .map(|e| trend_series(&medals.rows, GroupKey::Country, e))
      .unwrap_or_default();
    TrendPanel {
      year: scope.year,
      title: format!("Medal Score History ({suffix})"),
      notice: notice(&medals, points.is_empty(), NO_TREND_DATA),
      entity,
      points,
    }
  }))
}

// ─── Did you know ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Fact {
  pub text:   String,
  pub record: MedalRecord,
}

#[derive(Debug, Serialize)]
pub struct FactPanel {
  pub fact:   Option<Fact>,
  pub notice: Option<String>,
}

pub fn fact_text(year: i32, record: &MedalRecord) -> String {
  format!(
    "In {year}, {} from {} took home {} in {}!",
    record.athlete,
    record.country,
    record.medal_label(),
    record.discipline_clean
  )
}

/// `GET /medals/fact`: one random record of the selected subset.
pub async fn fact<D: Dataset>(
  State(state): State<AppState<D>>,
  params: Result<Query<MedalParams>, QueryRejection>,
) -> Result<Response, ApiError> {
  let Query(params) = params?;
  let medals = state.dataset.medals();
  let scope = Scope::of(&medals.rows, &params);

  let picked = scope.rows.choose(&mut OsRng).copied();
  let fact = scope.year.zip(picked).map(|(year, record)| Fact {
    text:   fact_text(year, record),
    record: record.clone(),
  });

  Ok(
    Json(FactPanel {
      notice: notice(&medals, fact.is_none(), NO_MEDAL_DATA),
      fact,
    })
    .into_response(),
  )
}
