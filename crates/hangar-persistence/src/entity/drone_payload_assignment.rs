//! `SeaORM` Entity for drone_payload_assignment table
//!
//! Join rows marking "this drone assignment includes payload Y". Rows never
//! outlive their parent assignment; the service layer deletes them in the
//! same transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "drone_payload_assignment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub payload_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client_drone_assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::client_drone_assignment::Column::Id"
    )]
    ClientDroneAssignment,
    #[sea_orm(
        belongs_to = "super::payload::Entity",
        from = "Column::PayloadId",
        to = "super::payload::Column::Id"
    )]
    Payload,
}

impl Related<super::client_drone_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientDroneAssignment.def()
    }
}

impl Related<super::payload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payload.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
