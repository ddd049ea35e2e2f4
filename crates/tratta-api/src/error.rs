//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! A pink-itinerary denial is *not* an `ApiError` — it is an expected
//! outcome, answered with a redirect built in the detail handler.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tratta_core::ValidationError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The viewer is known but not allowed to perform the action
  /// (e.g. editing someone else's itinerary).
  #[error("forbidden: {0}")]
  Forbidden(String),

  /// Field-level rejection from itinerary validation; answered with 422 so
  /// the boundary can present it next to the offending field.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::Validation(e) => {
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
