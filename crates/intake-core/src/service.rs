//! [`LeadService`]: the operations front-end collaborators call.
//!
//! Composes the validator, the query engine, and the lifecycle over an
//! injected [`LeadStore`]. Holds no state of its own beyond configuration, so
//! every test can build a fresh service over a fresh store.

use std::{str::FromStr, sync::Arc};

use chrono::Utc;

use crate::{
  Error, Result,
  lead::{Lead, LeadId, LeadStatus},
  query::{self, LeadPage, LeadQuery},
  store::LeadStore,
  validate::{self, RawSubmission},
};

/// Where resume references point when no base URL is configured.
pub const DEFAULT_RESUME_BASE_URL: &str = "https://example.com/resumes";

/// The result of [`LeadService::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
  /// No query was given: the whole store.
  All(Vec<Lead>),
  /// A query was given: one page of matches.
  Page(LeadPage),
}

pub struct LeadService<S> {
  store:           Arc<S>,
  resume_base_url: String,
}

impl<S> Clone for LeadService<S> {
  fn clone(&self) -> Self {
    Self {
      store:           Arc::clone(&self.store),
      resume_base_url: self.resume_base_url.clone(),
    }
  }
}

impl<S> LeadService<S>
where
  S: LeadStore,
  Error: From<S::Error>,
{
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      resume_base_url: DEFAULT_RESUME_BASE_URL.to_owned(),
    }
  }

  /// Prefix for the `resumeUrl` of leads submitted with a resume.
  pub fn with_resume_base_url(mut self, url: impl Into<String>) -> Self {
    self.resume_base_url = url.into();
    self
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  // ── List ──────────────────────────────────────────────────────────────

  /// The whole store, or one page of it when `query` is given.
  pub async fn list(&self, query: Option<&LeadQuery>) -> Result<Listing> {
    let leads = self.store.list_all().await?;
    Ok(match query {
      None => Listing::All(leads),
      Some(q) => Listing::Page(query::run(&leads, q)),
    })
  }

  /// A single lead by id.
  pub async fn get(&self, id: &str) -> Result<Lead> {
    let id = parse_id(Some(id))?;
    Ok(self.store.find_by_id(&id).await?)
  }

  // ── Create ────────────────────────────────────────────────────────────

  /// Validate `raw` and store it as a new `Pending` lead.
  ///
  /// On validation failure nothing is written and every offending field is
  /// reported.
  pub async fn create(&self, raw: RawSubmission) -> Result<Lead> {
    let valid = validate::validate(&raw).inspect_err(|errors| {
      tracing::warn!(%errors, "rejected lead submission");
    })?;

    let resume_url = valid
      .resume_file_name
      .as_deref()
      .and_then(|name| self.resume_url(name));

    let lead = Lead {
      id: LeadId::generate(),
      first_name: valid.first_name,
      last_name: valid.last_name,
      email: valid.email,
      linked_in: valid.linked_in,
      country: valid.country,
      visa_categories: valid.visa_categories,
      additional_info: valid.additional_info,
      resume_url,
      status: LeadStatus::Pending,
      created_at: Utc::now(),
    };

    let lead = self.store.insert(lead).await?;
    tracing::info!(id = %lead.id, "lead created");
    Ok(lead)
  }

  /// `None` when the client's file name has no non-empty path component.
  fn resume_url(&self, file_name: &str) -> Option<String> {
    // Keep only the final path component of whatever the client sent.
    let name = file_name.rsplit(['/', '\\']).find(|part| !part.trim().is_empty())?;
    Some(format!("{}/{}", self.resume_base_url.trim_end_matches('/'), name))
  }

  // ── Update status ─────────────────────────────────────────────────────

  /// Move lead `id` to the status named `requested`.
  ///
  /// `requested` must be a status wire string (`"Reached Out"`); whether the
  /// move is legal is decided by the lifecycle table inside the store.
  pub async fn update_status(
    &self,
    id: Option<&str>,
    requested: &str,
  ) -> Result<Lead> {
    let id = parse_id(id)?;

    let status = LeadStatus::from_str(requested)
      .map_err(|_| Error::InvalidStatus(requested.to_owned()))?;

    match self.store.update_status(&id, status).await {
      Ok(lead) => {
        tracing::info!(%id, %status, "lead status updated");
        Ok(lead)
      }
      Err(e) => {
        let e = Error::from(e);
        tracing::warn!(%id, %status, error = %e, "status update rejected");
        Err(e)
      }
    }
  }
}

fn parse_id(id: Option<&str>) -> Result<LeadId> {
  id.map(str::trim)
    .filter(|id| !id.is_empty())
    .map(LeadId::from)
    .ok_or(Error::MissingId)
}
