//! Async HTTP client wrapping the lead intake JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use intake_core::{
  lead::{Lead, LeadId, LeadStatus},
  validate::RawSubmission,
};
use reqwest::{Client, Response, multipart};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

/// Connection settings for the intake API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// A resume to upload alongside a submission.
pub struct Resume {
  pub file_name: String,
  pub contents:  Vec<u8>,
}

/// `{"success": bool, "data"?: T, "error"?: String}`
#[derive(Deserialize)]
struct Envelope<T> {
  data:  Option<T>,
  error: Option<String>,
}

/// Async HTTP client for the intake REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// Unwrap the response envelope, turning failures into readable errors.
  async fn data<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
    let status = resp.status();
    let envelope: Envelope<T> = resp
      .json()
      .await
      .with_context(|| format!("{what} → {status}: unreadable response"))?;

    if !status.is_success() {
      let message = envelope.error.unwrap_or_else(|| "request failed".into());
      return Err(anyhow!("{what} → {status}: {message}"));
    }
    envelope
      .data
      .ok_or_else(|| anyhow!("{what} → {status}: response has no data"))
  }

  // ── Leads ─────────────────────────────────────────────────────────────────

  /// `GET /api/leads`
  pub async fn list_leads(&self) -> Result<Vec<Lead>> {
    let resp = self
      .auth(self.client.get(self.url("/leads")))
      .send()
      .await
      .context("GET /leads failed")?;
    Self::data(resp, "GET /leads").await
  }

  /// `PATCH /api/leads/{id}`
  pub async fn update_status(&self, id: &LeadId, status: LeadStatus) -> Result<Lead> {
    let resp = self
      .auth(self.client.patch(self.url(&format!("/leads/{id}"))))
      .json(&json!({ "status": status }))
      .send()
      .await
      .context("PATCH /leads failed")?;
    Self::data(resp, "PATCH /leads").await
  }

  /// `POST /api/leads` as `multipart/form-data`. No credentials are sent.
  pub async fn submit(&self, raw: RawSubmission, resume: Option<Resume>) -> Result<Lead> {
    let mut form = multipart::Form::new();
    let fields = [
      ("firstName", raw.first_name),
      ("lastName", raw.last_name),
      ("email", raw.email),
      ("country", raw.country),
      ("linkedIn", raw.linked_in),
      ("visaCategories", raw.visa_categories),
      ("additionalInfo", raw.additional_info),
    ];
    for (name, value) in fields {
      if let Some(value) = value {
        form = form.text(name, value);
      }
    }
    if let Some(resume) = resume {
      let part = multipart::Part::bytes(resume.contents).file_name(resume.file_name);
      form = form.part("resume", part);
    }

    let resp = self
      .client
      .post(self.url("/leads"))
      .multipart(form)
      .send()
      .await
      .context("POST /leads failed")?;
    Self::data(resp, "POST /leads").await
  }
}
