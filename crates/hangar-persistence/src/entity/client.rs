//! `SeaORM` Entity for client table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// UUID string assigned at registration
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub address: String,
    /// Dotted-quad VM address with optional port, once configured
    pub vm_ip: Option<String>,
    /// Present only while the client uses password auth; a stored PEM
    /// object excludes it
    #[serde(skip_serializing)]
    pub vm_password: Option<String>,
    pub gmt_create: DateTimeUtc,
    pub gmt_modified: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::client_drone_assignment::Entity")]
    ClientDroneAssignment,
}

impl Related<super::client_drone_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientDroneAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
