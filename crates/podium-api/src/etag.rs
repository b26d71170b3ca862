//! Revision-based ETags.
//!
//! Every cacheable response is a pure function of the dataset, so the
//! dataset revision is the entity tag for all of them.

use axum::{
  Json,
  http::{HeaderMap, HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;

/// The quoted entity tag for `revision`.
pub fn etag_for(revision: &str) -> String { format!("\"{revision}\"") }

/// Whether `If-None-Match` names `revision`. Tags are accepted quoted or
/// bare, with or without a weak `W/` prefix; `*` matches anything.
pub fn if_none_match(headers: &HeaderMap, revision: &str) -> bool {
  headers
    .get_all(header::IF_NONE_MATCH)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(','))
    .map(|tag| tag.trim())
    .any(|tag| {
      let tag = tag.strip_prefix("W/").unwrap_or(tag);
      tag == "*" || tag.trim_matches('"') == revision
    })
}

/// Respond `304 Not Modified` when the client already holds `revision`,
/// otherwise serialise `body()` with the tag attached.
pub fn cached<T, F>(headers: &HeaderMap, revision: &str, body: F) -> Response
where
  T: Serialize,
  F: FnOnce() -> T,
{
  let tag = etag_for(revision);
  let Ok(tag_value) = HeaderValue::from_str(&tag) else {
    return Json(body()).into_response();
  };
  if if_none_match(headers, revision) {
    return (StatusCode::NOT_MODIFIED, [(header::ETAG, tag_value)])
      .into_response();
  }
  ([(header::ETAG, tag_value)], Json(body())).into_response()
}
