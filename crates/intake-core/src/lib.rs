//! Core types and operations for the lead-intake service.
//!
//! This crate is deliberately free of HTTP and storage dependencies. It holds
//! the lead model, the submission validator, the dashboard query engine, the
//! status lifecycle, the [`store::LeadStore`] abstraction, and the
//! [`service::LeadService`] that composes them.

pub mod error;
pub mod lead;
pub mod lifecycle;
pub mod query;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
