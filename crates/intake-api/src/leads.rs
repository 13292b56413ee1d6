//! Handlers for `/leads` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/leads` | Optional `search`, `status`, `page`; any of them switches to one page plus `meta` |
//! | `POST`  | `/leads` | Form body (see [`crate::form`]); returns 201 + stored lead |
//! | `GET`   | `/leads/{id}` | 404 if not found |
//! | `PATCH` | `/leads?id=<id>` | Body: `{"status":"Reached Out"}` |
//! | `PATCH` | `/leads/{id}` | Same as above |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use intake_core::{
  Error as CoreError,
  lead::Lead,
  query::{LeadPage, LeadQuery},
  service::{LeadService, Listing},
  store::LeadStore,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, form::Submission};

// ─── Envelope ─────────────────────────────────────────────────────────────────

/// `{"success": true, "data": ...}`, plus `meta` on paged listings.
#[derive(Debug, Serialize)]
pub struct Success<T> {
  pub success: bool,
  pub data:    T,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub meta:    Option<PageMeta>,
}

impl<T> Success<T> {
  pub fn new(data: T) -> Self {
    Self {
      success: true,
      data,
      meta: None,
    }
  }
}

/// Paging numbers for a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
  pub page:           i64,
  pub page_size:      usize,
  pub total_pages:    usize,
  pub filtered_count: usize,
}

impl From<LeadPage> for Success<Vec<Lead>> {
  fn from(page: LeadPage) -> Self {
    Self {
      success: true,
      meta:    Some(PageMeta {
        page:           page.page,
        page_size:      page.page_size,
        total_pages:    page.total_pages,
        filtered_count: page.filtered_count,
      }),
      data:    page.leads,
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Case-insensitive name search.
  pub search: Option<String>,
  /// Exact status, e.g. `Reached Out`. Unknown values match nothing.
  pub status: Option<String>,
  /// 1-indexed page. Text that is not a number yields an empty page.
  pub page:   Option<String>,
}

impl ListParams {
  fn into_query(self) -> Option<LeadQuery> {
    if self.search.is_none() && self.status.is_none() && self.page.is_none() {
      return None;
    }
    Some(LeadQuery {
      search: self.search.unwrap_or_default(),
      status: self.status,
      page:   self.page.map_or(1, |p| p.trim().parse().unwrap_or(0)),
    })
  }
}

/// `GET /leads[?search=...][&status=...][&page=...]`
pub async fn list<S>(
  State(service): State<LeadService<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Success<Vec<Lead>>>, ApiError>
where
  S: LeadStore + 'static,
  CoreError: From<S::Error>,
{
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let query = params.into_query();
  let body = match service.list(query.as_ref()).await? {
    Listing::All(leads) => Success::new(leads),
    Listing::Page(page) => Success::from(page),
  };
  Ok(Json(body))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /leads/{id}`
pub async fn get_one<S>(
  State(service): State<LeadService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Success<Lead>>, ApiError>
where
  S: LeadStore + 'static,
  CoreError: From<S::Error>,
{
  let lead = service.get(&id).await?;
  Ok(Json(Success::new(lead)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /leads`: returns 201 + the stored lead.
pub async fn create<S>(
  State(service): State<LeadService<S>>,
  Submission(raw): Submission,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore + 'static,
  CoreError: From<S::Error>,
{
  let lead = service.create(raw).await?;
  Ok((StatusCode::CREATED, Json(Success::new(lead))))
}

// ─── Update status ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IdParam {
  pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: Option<String>,
}

/// `PATCH /leads?id=<id>`: body: `{"status":"Reached Out"}`
pub async fn update_status<S>(
  State(service): State<LeadService<S>>,
  params: Result<Query<IdParam>, QueryRejection>,
  body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<Success<Lead>>, ApiError>
where
  S: LeadStore + 'static,
  CoreError: From<S::Error>,
{
  let Query(IdParam { id }) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  apply_status(&service, id.as_deref(), body).await
}

/// `PATCH /leads/{id}`: body: `{"status":"Reached Out"}`
pub async fn update_status_at<S>(
  State(service): State<LeadService<S>>,
  Path(id): Path<String>,
  body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<Success<Lead>>, ApiError>
where
  S: LeadStore + 'static,
  CoreError: From<S::Error>,
{
  apply_status(&service, Some(&id), body).await
}

async fn apply_status<S>(
  service: &LeadService<S>,
  id: Option<&str>,
  body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<Success<Lead>>, ApiError>
where
  S: LeadStore + 'static,
  CoreError: From<S::Error>,
{
  // The id is checked before the body is looked at.
  if id.is_none_or(|id| id.trim().is_empty()) {
    return Err(CoreError::MissingId.into());
  }
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let requested = body.status.unwrap_or_default();
  let lead = service.update_status(id, &requested).await?;
  Ok(Json(Success::new(lead)))
}
