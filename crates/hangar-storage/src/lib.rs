//! Hangar Storage - Object storage gateway
//!
//! This crate provides:
//! - The `ObjectStore` trait (bucket/object collaborator boundary)
//! - An S3-compatible backend and a filesystem backend
//! - The file service: kind-specific upload rules, timestamped per-client
//!   paths, listings, signed URLs, deletes

pub mod files;
pub mod fs;
pub mod s3;
pub mod store;

// Re-exports for convenience
pub use files::{FileKind, StoredFile};
pub use fs::FsObjectStore;
pub use s3::{S3ObjectStore, S3Settings};
pub use store::{ObjectInfo, ObjectStore};
