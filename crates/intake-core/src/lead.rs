//! Lead types: the qualification record a prospective client submits.
//!
//! A lead is created once from a validated submission and afterwards only its
//! [`LeadStatus`] ever changes. Everything else, `id` and `created_at`
//! included, is fixed at creation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque lead identifier.
///
/// Freshly created leads get a v4 UUID; seeded leads may carry any unique
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(String);

impl LeadId {
  /// A new, globally unique id.
  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for LeadId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<String> for LeadId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for LeadId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Triage stage of a lead. See [`crate::lifecycle`] for the legal moves.
///
/// The wire form is the display string (`"Reached Out"`), both in JSON and in
/// query parameters.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
pub enum LeadStatus {
  #[default]
  #[serde(rename = "Pending")]
  #[strum(serialize = "Pending")]
  Pending,
  #[serde(rename = "Reached Out")]
  #[strum(serialize = "Reached Out")]
  ReachedOut,
  #[serde(rename = "Completed")]
  #[strum(serialize = "Completed")]
  Completed,
}

/// The immigration pathway a lead is interested in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
pub enum VisaCategory {
  #[serde(rename = "O-1")]
  #[strum(serialize = "O-1")]
  O1,
  #[serde(rename = "EB-1A")]
  #[strum(serialize = "EB-1A")]
  Eb1a,
  #[serde(rename = "EB-2 NIW")]
  #[strum(serialize = "EB-2 NIW")]
  Eb2Niw,
  #[serde(rename = "I don't know")]
  #[strum(serialize = "I don't know")]
  Unsure,
}

/// Countries offered by the submission form. Not re-checked server-side.
pub const COUNTRIES: &[&str] = &[
  "United States",
  "Mexico",
  "Brazil",
  "South Korea",
  "Russia",
  "France",
  "India",
  "China",
  "Other",
];

// ─── Lead ────────────────────────────────────────────────────────────────────

/// A submitted qualification record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
  pub id:              LeadId,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub linked_in:       String,
  pub country:         String,
  /// Never empty. Entry order is kept for display only.
  pub visa_categories: Vec<VisaCategory>,
  #[serde(default)]
  pub additional_info: String,
  /// Reference to the stored resume, when one was attached.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resume_url:      Option<String>,
  pub status:          LeadStatus,
  /// Server-assigned; never changes after creation.
  pub created_at:      DateTime<Utc>,
}

impl Lead {
  /// `"{first} {last}"`, the string the dashboard search runs against.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}
