//! JSON/form REST API for lead intake.
//!
//! Exposes an axum [`Router`] backed by a [`LeadService`] over any
//! [`intake_core::store::LeadStore`]. Auth, TLS, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", intake_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod form;
pub mod leads;

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::get,
};
use intake_core::{service::LeadService, store::LeadStore};

pub use error::ApiError;

/// Largest accepted request body; sized for a resume upload.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: LeadService<S>) -> Router<()>
where
  S: LeadStore + 'static,
  intake_core::Error: From<S::Error>,
{
  Router::new()
    .route(
      "/leads",
      get(leads::list::<S>)
        .post(leads::create::<S>)
        .patch(leads::update_status::<S>),
    )
    .route(
      "/leads/{id}",
      get(leads::get_one::<S>).patch(leads::update_status_at::<S>),
    )
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .with_state(service)
}
