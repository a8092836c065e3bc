//! `SeaORM` Entity definitions for the Hangar schema

pub mod prelude;

pub mod client;
pub mod client_drone_assignment;
pub mod drone;
pub mod drone_payload_assignment;
pub mod payload;
