//! Hangar Registry - Client, assignment and VM credential services
//!
//! This crate provides:
//! - The client registry (CRUD with transactional cascade delete)
//! - The drone/payload assignment ledger
//! - The VM credential manager (password or PEM key, never both)
//! - The client-list TTL cache with an injected clock

pub mod cache;
pub mod model;
pub mod service;

// Re-exports for convenience
pub use cache::{ClientCache, Clock, SystemClock};
pub use model::{AssignmentView, CatalogRef, ClientPatch, NewClient};
