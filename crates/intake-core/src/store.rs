//! The `LeadStore` trait.
//!
//! Implemented by storage backends (e.g. `intake-store-memory`). The service
//! layer and everything above it depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::lead::{Lead, LeadId, LeadStatus};

/// The system of record for leads.
///
/// Leads are kept most-recent-first and are never deleted. The only mutation
/// after insertion is a status change, which the backend must check against
/// [`crate::lifecycle::TRANSITIONS`] atomically with the write.
///
/// Backends must serialise `insert` and `update_status` against each other;
/// readers must see a record either wholly before or wholly after a write.
pub trait LeadStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every lead, most recently created first.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Lead>, Self::Error>> + Send + '_;

  /// Add `lead` at the head. Fails if its id is already present.
  fn insert(
    &self,
    lead: Lead,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;

  /// Fetch one lead. Fails if absent.
  fn find_by_id<'a>(
    &'a self,
    id: &'a LeadId,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + 'a;

  /// Move a lead to `status` and return the updated record.
  ///
  /// Fails if the lead is absent or the move is not in the transition table.
  fn update_status<'a>(
    &'a self,
    id: &'a LeadId,
    status: LeadStatus,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + 'a;

  /// Number of stored leads.
  fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
