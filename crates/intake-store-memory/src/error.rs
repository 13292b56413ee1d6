//! Error type for `intake-store-memory`.

use intake_core::{lead::LeadId, lifecycle::TransitionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("lead not found: {0}")]
  NotFound(LeadId),

  #[error("duplicate lead id: {0}")]
  DuplicateId(LeadId),

  #[error(transparent)]
  Lifecycle(#[from] TransitionError),
}

impl From<Error> for intake_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::NotFound(id) => Self::NotFound(id),
      Error::DuplicateId(id) => Self::DuplicateId(id),
      Error::Lifecycle(t) => t.into(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
