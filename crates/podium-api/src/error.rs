//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Only malformed requests are errors; missing data is reported through the
/// `notice` field of an otherwise successful response.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad query: {0}")]
  Query(#[from] QueryRejection),

  #[error("bad body: {0}")]
  Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() })))
      .into_response()
  }
}
