//! Submission validation.
//!
//! [`RULES`] is the single rule table. [`validate`] runs every rule and is
//! the authoritative gate in front of the store; [`check_field`] runs one
//! rule for interactive feedback while a form is being filled in. Both read
//! the same table, so a client pre-check can never drift from the server.

use std::{
  collections::BTreeMap,
  fmt,
  str::FromStr,
  sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::lead::VisaCategory;

static EMAIL_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex is valid"));

// ─── Input ───────────────────────────────────────────────────────────────────

/// A submission exactly as it arrived: every field is optional text.
///
/// `visa_categories` holds the serialized JSON list (`["O-1","EB-1A"]`), the
/// way the form posts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
  pub first_name:       Option<String>,
  pub last_name:        Option<String>,
  pub email:            Option<String>,
  pub country:          Option<String>,
  pub linked_in:        Option<String>,
  pub visa_categories:  Option<String>,
  pub additional_info:  Option<String>,
  /// File name of the attached resume, if any. Not part of the form body.
  #[serde(skip)]
  pub resume_file_name: Option<String>,
}

impl RawSubmission {
  /// The raw text submitted for `field`.
  pub fn get(&self, field: Field) -> Option<&str> {
    match field {
      Field::FirstName => self.first_name.as_deref(),
      Field::LastName => self.last_name.as_deref(),
      Field::Email => self.email.as_deref(),
      Field::Country => self.country.as_deref(),
      Field::LinkedIn => self.linked_in.as_deref(),
      Field::VisaCategories => self.visa_categories.as_deref(),
    }
  }

  /// Store a form value by its wire name. Returns `false` for names that are
  /// not part of the form.
  pub fn set(&mut self, name: &str, value: String) -> bool {
    let slot = match name {
      "firstName" => &mut self.first_name,
      "lastName" => &mut self.last_name,
      "email" => &mut self.email,
      "country" => &mut self.country,
      "linkedIn" => &mut self.linked_in,
      "visaCategories" => &mut self.visa_categories,
      "additionalInfo" => &mut self.additional_info,
      _ => return false,
    };
    *slot = Some(value);
    true
  }
}

/// A submission that passed every rule, normalised and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLead {
  pub first_name:       String,
  pub last_name:        String,
  pub email:            String,
  pub country:          String,
  pub linked_in:        String,
  /// Non-empty, duplicates removed, entry order kept.
  pub visa_categories:  Vec<VisaCategory>,
  pub additional_info:  String,
  pub resume_file_name: Option<String>,
}

// ─── Fields and errors ───────────────────────────────────────────────────────

/// A validated form field. Names match the wire (camelCase) field names.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
  FirstName,
  LastName,
  Email,
  Country,
  LinkedIn,
  VisaCategories,
}

impl Field {
  /// Human label used in error messages.
  pub fn label(self) -> &'static str {
    match self {
      Self::FirstName => "First name",
      Self::LastName => "Last name",
      Self::Email => "Email",
      Self::Country => "Country",
      Self::LinkedIn => "LinkedIn profile",
      Self::VisaCategories => "Visa categories",
    }
  }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
  /// Absent, or blank after trimming.
  Required,
  /// Does not look like `local@domain.tld`.
  InvalidEmail,
  /// The category list is not a JSON list of strings.
  Malformed,
  /// The list decoded, but names a category outside the known set.
  UnknownCategory(String),
  /// The list decoded to nothing.
  EmptySelection,
}

impl FieldError {
  /// True for the failures that come from decoding the category list.
  pub fn is_decode_failure(&self) -> bool {
    matches!(self, Self::Malformed | Self::UnknownCategory(_))
  }

  /// The message shown next to `field` in a form.
  pub fn message(&self, field: Field) -> String {
    match self {
      Self::Required => format!("{} is required", field.label()),
      Self::InvalidEmail => "Please enter a valid email".to_owned(),
      Self::Malformed => "Invalid visa categories format".to_owned(),
      Self::UnknownCategory(c) => format!("Unknown visa category: {c:?}"),
      Self::EmptySelection => {
        "Please select at least one visa category".to_owned()
      }
    }
  }
}

/// Every rejected field of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
  errors: BTreeMap<Field, FieldError>,
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let fields: Vec<&str> = self.errors.keys().map(|k| (*k).into()).collect();
    write!(f, "invalid submission: {}", fields.join(", "))
  }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
  pub fn is_empty(&self) -> bool { self.errors.is_empty() }

  pub fn len(&self) -> usize { self.errors.len() }

  pub fn get(&self, field: Field) -> Option<&FieldError> {
    self.errors.get(&field)
  }

  pub fn insert(&mut self, field: Field, error: FieldError) {
    self.errors.insert(field, error);
  }

  /// Drop the error for `field`, as a form does once the user edits it.
  pub fn clear(&mut self, field: Field) -> Option<FieldError> {
    self.errors.remove(&field)
  }

  pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
    self.errors.iter().map(|(f, e)| (*f, e))
  }

  /// True if any required field was absent or blank.
  pub fn has_missing(&self) -> bool {
    self.errors.values().any(|e| *e == FieldError::Required)
  }

  /// True if the category list failed to decode.
  pub fn has_decode_failure(&self) -> bool {
    self.errors.values().any(FieldError::is_decode_failure)
  }

  /// `field name → message`, ready for a JSON error body.
  pub fn messages(&self) -> BTreeMap<&'static str, String> {
    self
      .errors
      .iter()
      .map(|(f, e)| ((*f).into(), e.message(*f)))
      .collect()
  }
}

// ─── Rule table ──────────────────────────────────────────────────────────────

type Rule = fn(Option<&str>) -> Result<(), FieldError>;

/// One rule per validated field, in form order.
pub const RULES: &[(Field, Rule)] = &[
  (Field::FirstName, required),
  (Field::LastName, required),
  (Field::Email, email),
  (Field::Country, required),
  (Field::LinkedIn, required),
  (Field::VisaCategories, visa_categories),
];

fn required(value: Option<&str>) -> Result<(), FieldError> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(()),
    _ => Err(FieldError::Required),
  }
}

fn email(value: Option<&str>) -> Result<(), FieldError> {
  required(value)?;
  let value = value.map(str::trim).unwrap_or_default();
  if EMAIL_REGEX.is_match(value) {
    Ok(())
  } else {
    Err(FieldError::InvalidEmail)
  }
}

fn visa_categories(value: Option<&str>) -> Result<(), FieldError> {
  match value {
    Some(raw) if !raw.trim().is_empty() => {
      decode_visa_categories(raw).map(drop)
    }
    _ => Err(FieldError::Required),
  }
}

/// Decode the serialized category list into known categories.
///
/// Duplicates are dropped; first-entry order is kept.
pub fn decode_visa_categories(
  raw: &str,
) -> Result<Vec<VisaCategory>, FieldError> {
  let names: Vec<String> =
    serde_json::from_str(raw).map_err(|_| FieldError::Malformed)?;

  let mut categories = Vec::with_capacity(names.len());
  for name in names {
    let category = VisaCategory::from_str(&name)
      .map_err(|_| FieldError::UnknownCategory(name.clone()))?;
    if !categories.contains(&category) {
      categories.push(category);
    }
  }

  if categories.is_empty() {
    return Err(FieldError::EmptySelection);
  }
  Ok(categories)
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Run the rule for a single field. Used for live, per-field feedback.
pub fn check_field(field: Field, value: Option<&str>) -> Result<(), FieldError> {
  RULES
    .iter()
    .find(|(f, _)| *f == field)
    .map_or(Ok(()), |(_, rule)| rule(value))
}

/// Run every rule over `raw`, collecting all failures.
pub fn validate(raw: &RawSubmission) -> Result<ValidLead, ValidationErrors> {
  let mut errors = ValidationErrors::default();
  for (field, rule) in RULES {
    if let Err(e) = rule(raw.get(*field)) {
      errors.insert(*field, e);
    }
  }

  let visa_categories = raw
    .visa_categories
    .as_deref()
    .and_then(|v| decode_visa_categories(v).ok());

  let Some(visa_categories) = visa_categories.filter(|_| errors.is_empty())
  else {
    return Err(errors);
  };

  let text = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_owned();

  Ok(ValidLead {
    first_name: text(&raw.first_name),
    last_name: text(&raw.last_name),
    email: text(&raw.email),
    country: text(&raw.country),
    linked_in: text(&raw.linked_in),
    visa_categories,
    additional_info: raw.additional_info.clone().unwrap_or_default(),
    resume_file_name: raw
      .resume_file_name
      .clone()
      .filter(|name| !name.trim().is_empty()),
  })
}
