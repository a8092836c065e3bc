//! `SeaORM` Entity for drone catalog table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "drone")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
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
