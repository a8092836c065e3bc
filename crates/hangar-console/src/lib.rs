//! Hangar Console - REST API backend
//!
//! This crate provides:
//! - Console endpoints for clients, assignments, catalogs, files and VM
//!   credentials
//! - The `ApiResult` envelope with error-code and HTTP-status mapping
//! - The shared `AppState`

pub mod model;
pub mod state;
pub mod v1;

// Re-export commonly used types
pub use model::ApiResult;
pub use state::AppState;
pub use v1::route::routes as v1_routes;
