//! HTTP server for lead intake.
//!
//! Mounts the [`intake_api`] router under `/api`, gated by a single admin
//! Basic-auth credential. Submitting a lead stays public.

pub mod auth;
pub mod error;

pub use error::Error;

use std::sync::Arc;

use axum::{Router, middleware};
use intake_core::{service::LeadService, store::LeadStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, require_admin};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `INTAKE_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  #[serde(default = "default_resume_base_url")]
  pub resume_base_url:    String,
  /// Fill an empty store with demo leads at startup.
  #[serde(default)]
  pub seed_demo_leads:    bool,
  pub auth_username:      String,
  pub auth_password_hash: String,
}

fn default_resume_base_url() -> String {
  intake_core::service::DEFAULT_RESUME_BASE_URL.to_owned()
}

impl ServerConfig {
  pub fn auth(&self) -> AuthConfig {
    AuthConfig {
      username:      self.auth_username.clone(),
      password_hash: self.auth_password_hash.clone(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the router needs.
#[derive(Clone)]
pub struct AppState<S> {
  pub service: LeadService<S>,
  pub auth:    Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full server [`Router`]: API under `/api`, admin gate, tracing.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: LeadStore + 'static,
  intake_core::Error: From<S::Error>,
{
  Router::new()
    .nest("/api", intake_api::api_router(state.service))
    .layer(middleware::from_fn_with_state(state.auth, require_admin))
    .layer(TraceLayer::new_for_http())
}
