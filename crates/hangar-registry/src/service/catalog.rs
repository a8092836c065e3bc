//! Catalog reads
//!
//! The drone and payload catalogs are reference data provisioned by
//! operations tooling; the console only ever lists them to populate
//! assignment forms.

use sea_orm::*;

use hangar_persistence::entity::{drone, payload};

pub async fn list_drones(db: &DatabaseConnection) -> anyhow::Result<Vec<drone::Model>> {
    Ok(drone::Entity::find()
        .order_by_asc(drone::Column::Id)
        .all(db)
        .await?)
}

pub async fn list_payloads(db: &DatabaseConnection) -> anyhow::Result<Vec<payload::Model>> {
    Ok(payload::Entity::find()
        .order_by_asc(payload::Column::Id)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{seed_catalog, test_db};

    #[tokio::test]
    async fn test_catalog_listings_ordered_by_id() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let drones = list_drones(&db).await.unwrap();
        assert_eq!(drones.iter().map(|d| d.id).collect::<Vec<_>>(), vec![5, 6]);

        let payloads = list_payloads(&db).await.unwrap();
        assert_eq!(payloads.iter().map(|p| p.id).collect::<Vec<_>>(), vec![7, 8, 9]);
    }
}
