//! [`MemoryStore`]: the in-memory implementation of [`LeadStore`].

use std::{collections::VecDeque, sync::Arc};

use intake_core::{
  lead::{Lead, LeadId, LeadStatus},
  lifecycle::check_transition,
  store::LeadStore,
};
use tokio::sync::RwLock;

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store held in process memory.
///
/// Cloning is cheap: clones share the same underlying sequence.
#[derive(Clone, Default)]
pub struct MemoryStore {
  /// Most recently created first.
  leads: Arc<RwLock<VecDeque<Lead>>>,
}

impl MemoryStore {
  /// An empty store.
  pub fn new() -> Self { Self::default() }

  /// A store holding `leads` in the given order (most recent first).
  ///
  /// Fails if two leads share an id.
  pub fn with_leads(leads: impl IntoIterator<Item = Lead>) -> Result<Self> {
    let mut seq: VecDeque<Lead> = VecDeque::new();
    for lead in leads {
      if seq.iter().any(|l| l.id == lead.id) {
        return Err(Error::DuplicateId(lead.id));
      }
      seq.push_back(lead);
    }
    Ok(Self {
      leads: Arc::new(RwLock::new(seq)),
    })
  }
}

fn position(leads: &VecDeque<Lead>, id: &LeadId) -> Option<usize> {
  leads.iter().position(|l| &l.id == id)
}

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for MemoryStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<Lead>> {
    let leads = self.leads.read().await;
    Ok(leads.iter().cloned().collect())
  }

  async fn insert(&self, lead: Lead) -> Result<Lead> {
    let mut leads = self.leads.write().await;
    if position(&leads, &lead.id).is_some() {
      return Err(Error::DuplicateId(lead.id));
    }
    leads.push_front(lead.clone());
    Ok(lead)
  }

  async fn find_by_id(&self, id: &LeadId) -> Result<Lead> {
    let leads = self.leads.read().await;
    position(&leads, id)
      .map(|i| leads[i].clone())
      .ok_or_else(|| Error::NotFound(id.clone()))
  }

  async fn update_status(&self, id: &LeadId, status: LeadStatus) -> Result<Lead> {
    // Check and write under one guard so a lead can only leave `Pending` once.
    let mut leads = self.leads.write().await;
    let index = position(&leads, id).ok_or_else(|| Error::NotFound(id.clone()))?;
    let lead = &mut leads[index];
    check_transition(lead.status, status)?;
    lead.status = status;
    Ok(lead.clone())
  }

  async fn count(&self) -> Result<usize> { Ok(self.leads.read().await.len()) }
}
