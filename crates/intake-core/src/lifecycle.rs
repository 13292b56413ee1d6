//! The lead status state machine.
//!
//! `Pending → Reached Out → Completed`. Only moves listed in [`TRANSITIONS`]
//! are legal; everything else, backward moves included, is rejected. No
//! operation in this workspace drives a lead into `Completed`.

use thiserror::Error;

use crate::lead::LeadStatus;

/// Every legal `(from, to)` move.
pub const TRANSITIONS: &[(LeadStatus, LeadStatus)] =
  &[(LeadStatus::Pending, LeadStatus::ReachedOut)];

/// A requested move that is not in [`TRANSITIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move a lead from {from} to {to}")]
pub struct TransitionError {
  pub from: LeadStatus,
  pub to:   LeadStatus,
}

/// Check `from → to` against the transition table.
pub fn check_transition(
  from: LeadStatus,
  to: LeadStatus,
) -> Result<(), TransitionError> {
  if TRANSITIONS.contains(&(from, to)) {
    Ok(())
  } else {
    Err(TransitionError { from, to })
  }
}

/// The statuses reachable from `from` in one move.
pub fn allowed_next(from: LeadStatus) -> impl Iterator<Item = LeadStatus> {
  TRANSITIONS
    .iter()
    .filter(move |(f, _)| *f == from)
    .map(|(_, t)| *t)
}

pub fn is_terminal(status: LeadStatus) -> bool {
  status == LeadStatus::Completed
}
