//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use intake_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Every variant renders as `{"success": false, "error": "..."}`; validation
/// failures add a `fields` map of per-field messages.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] CoreError),

  #[error("bad request: {0}")]
  BadRequest(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message, fields) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone(), None),
      ApiError::Core(e) => match e {
        CoreError::Validation(errors) => {
          let message = if errors.has_missing() {
            "Missing required fields"
          } else if errors.has_decode_failure() {
            "Invalid visa categories format"
          } else {
            "Invalid submission"
          };
          (
            StatusCode::BAD_REQUEST,
            message.to_owned(),
            Some(errors.messages()),
          )
        }
        CoreError::MissingId => {
          (StatusCode::BAD_REQUEST, "Lead ID is required".to_owned(), None)
        }
        CoreError::InvalidStatus(_) => (
          StatusCode::BAD_REQUEST,
          "Valid status is required".to_owned(),
          None,
        ),
        CoreError::InvalidTransition { .. } => {
          (StatusCode::CONFLICT, e.to_string(), None)
        }
        CoreError::NotFound(_) => {
          (StatusCode::NOT_FOUND, "Lead not found".to_owned(), None)
        }
        CoreError::DuplicateId(_) => {
          (StatusCode::CONFLICT, "Lead already exists".to_owned(), None)
        }
        CoreError::Store(source) => {
          tracing::error!(error = %source, "lead store failure");
          (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server error".to_owned(),
            None,
          )
        }
      },
    };

    let body = match fields {
      Some(fields) => json!({ "success": false, "error": message, "fields": fields }),
      None => json!({ "success": false, "error": message }),
    };
    (status, Json(body)).into_response()
  }
}
