//! `SeaORM` Entity prelude

pub use super::client::Entity as Client;
pub use super::client_drone_assignment::Entity as ClientDroneAssignment;
pub use super::drone::Entity as Drone;
pub use super::drone_payload_assignment::Entity as DronePayloadAssignment;
pub use super::payload::Entity as Payload;
