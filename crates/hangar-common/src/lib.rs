//! Hangar Common - Shared types and utilities
//!
//! This crate provides the foundational types used across all Hangar
//! components:
//! - Error types and error codes
//! - Input validation helpers

pub mod error;
pub mod validation;

// Re-exports for convenience
pub use error::{ErrorCode, HangarError};

/// Logical file kinds accepted by the storage gateway, as they appear in
/// query parameters and form fields.
pub const FILE_KIND_MISSION: &str = "mission";
pub const FILE_KIND_IMAGE: &str = "image";
pub const FILE_KIND_PEM: &str = "pem";
