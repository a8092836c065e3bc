//! Hangar Server - binary support library
//!
//! Configuration and startup plumbing for the `hangar-server` binary; the
//! console API itself lives in `hangar-console`.

pub mod model;
pub mod startup;
