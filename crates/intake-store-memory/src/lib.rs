//! In-memory backend for the lead-intake store.
//!
//! Leads live in a single shared sequence behind a [`tokio::sync::RwLock`]:
//! writers are serialised, readers run concurrently and never observe a
//! half-applied write. Nothing is persisted.

mod store;

pub mod error;
pub mod seed;

pub use error::{Error, Result};
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
