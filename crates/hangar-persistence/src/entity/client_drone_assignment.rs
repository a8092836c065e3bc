//! `SeaORM` Entity for client_drone_assignment table
//!
//! One row per (client, drone model) pair: "client owns `quantity` units of
//! drone model X". Quantity is kept >= 1 by the service layer; a quantity
//! of zero means the row is deleted instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "client_drone_assignment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub client_id: String,
    pub drone_id: i64,
    pub quantity: i32,
    pub gmt_create: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::drone::Entity",
        from = "Column::DroneId",
        to = "super::drone::Column::Id"
    )]
    Drone,
    #[sea_orm(has_many = "super::drone_payload_assignment::Entity")]
    DronePayloadAssignment,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::drone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drone.def()
    }
}

impl Related<super::drone_payload_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DronePayloadAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
