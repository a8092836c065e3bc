//! Domain models for the registry services

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Input for registering a new client.
#[derive(Clone, Debug, Default)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub address: String,
    pub vm_ip: Option<String>,
}

/// Partial update for an existing client; absent fields stay untouched.
#[derive(Clone, Debug, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub vm_ip: Option<String>,
}

/// Catalog reference embedded in assignment listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogRef {
    pub id: i64,
    pub name: String,
}

/// One drone assignment with its payload set, as the console presents it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentView {
    pub id: i64,
    pub client_id: String,
    pub drone: CatalogRef,
    pub quantity: i32,
    pub payloads: Vec<CatalogRef>,
    pub gmt_create: DateTime<Utc>,
}
