//! The [`Submission`] extractor for `POST /leads`.
//!
//! Accepts `multipart/form-data` (the shape a browser form with a file input
//! posts) and `application/x-www-form-urlencoded`. Both produce a
//! [`RawSubmission`]; nothing is validated here.

use axum::{
  Form,
  extract::{FromRequest, Multipart, Request},
  http::header,
};
use intake_core::validate::RawSubmission;

use crate::error::ApiError;

/// Name of the multipart part carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

/// A lead submission as posted by the intake form.
pub struct Submission(pub RawSubmission);

impl<S> FromRequest<S> for Submission
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let is_multipart = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
      let Form(raw) = Form::<RawSubmission>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      return Ok(Self(raw));
    }

    let mut multipart = Multipart::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut raw = RawSubmission::default();
    while let Some(field) = multipart
      .next_field()
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
      let Some(name) = field.name().map(str::to_owned) else {
        continue;
      };

      if name == RESUME_FIELD {
        let file_name = field.file_name().map(str::to_owned);
        // File contents go to external storage; only the name is kept.
        let contents = field
          .bytes()
          .await
          .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        if !contents.is_empty() {
          raw.resume_file_name = file_name;
        }
        continue;
      }

      let value = field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      if !raw.set(&name, value) {
        tracing::debug!(field = %name, "ignoring unknown form field");
      }
    }

    Ok(Self(raw))
  }
}
