//! Error types for `intake-core`.

use thiserror::Error;

use crate::{
  lead::{LeadId, LeadStatus},
  lifecycle::TransitionError,
  validate::ValidationErrors,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Validation(ValidationErrors),

  #[error("lead not found: {0}")]
  NotFound(LeadId),

  #[error("duplicate lead id: {0}")]
  DuplicateId(LeadId),

  #[error("lead id is required")]
  MissingId,

  #[error("unknown lead status: {0:?}")]
  InvalidStatus(String),

  #[error("cannot move a lead from {from} to {to}")]
  InvalidTransition { from: LeadStatus, to: LeadStatus },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ValidationErrors> for Error {
  fn from(e: ValidationErrors) -> Self { Self::Validation(e) }
}

impl From<TransitionError> for Error {
  fn from(TransitionError { from, to }: TransitionError) -> Self {
    Self::InvalidTransition { from, to }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
