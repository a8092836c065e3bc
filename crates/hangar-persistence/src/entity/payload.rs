//! `SeaORM` Entity for payload catalog table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payload")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drone_payload_assignment::Entity")]
    DronePayloadAssignment,
}

impl Related<super::drone_payload_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DronePayloadAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
