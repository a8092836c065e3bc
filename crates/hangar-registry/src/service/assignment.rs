//! Drone/payload assignment ledger
//!
//! Join-table bookkeeping between clients, drone models and payloads. The
//! assignment insert and its payload rows commit in one transaction, as does
//! every delete that spans both tables.

use std::collections::HashMap;

use sea_orm::*;

use hangar_common::HangarError;
use hangar_persistence::entity::{
    client, client_drone_assignment, drone, drone_payload_assignment, payload,
};

use crate::model::{AssignmentView, CatalogRef};

/// Create an assignment, optionally with an initial payload set.
///
/// Quantity is validated here regardless of what the caller checked; the
/// assignment row and its payload rows either all commit or none do.
pub async fn create(
    db: &DatabaseConnection,
    client_id: &str,
    drone_id: i64,
    quantity: i32,
    payload_ids: &[i64],
) -> anyhow::Result<AssignmentView> {
    if quantity < 1 {
        return Err(
            HangarError::Validation(format!("quantity must be >= 1, got {}", quantity)).into(),
        );
    }

    if client::Entity::find_by_id(client_id).one(db).await?.is_none() {
        return Err(HangarError::ClientNotFound(client_id.to_string()).into());
    }
    let drone = drone::Entity::find_by_id(drone_id)
        .one(db)
        .await?
        .ok_or(HangarError::DroneNotFound(drone_id))?;
    let payloads = resolve_payloads(db, payload_ids).await?;

    let tx = db.begin().await?;

    let created = client_drone_assignment::ActiveModel {
        client_id: Set(client_id.to_string()),
        drone_id: Set(drone_id),
        quantity: Set(quantity),
        gmt_create: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&tx)
    .await?;

    for payload_id in payload_ids {
        drone_payload_assignment::ActiveModel {
            assignment_id: Set(created.id),
            payload_id: Set(*payload_id),
            ..Default::default()
        }
        .insert(&tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        client_id,
        drone_id,
        quantity,
        payloads = payload_ids.len(),
        assignment_id = created.id,
        "assignment created"
    );

    Ok(AssignmentView {
        id: created.id,
        client_id: created.client_id,
        drone: CatalogRef {
            id: drone.id,
            name: drone.name,
        },
        quantity: created.quantity,
        payloads,
        gmt_create: created.gmt_create,
    })
}

/// Attach payloads to an existing assignment.
///
/// An empty payload list is a successful no-op.
pub async fn assign_payloads(
    db: &DatabaseConnection,
    assignment_id: i64,
    payload_ids: &[i64],
) -> anyhow::Result<Vec<drone_payload_assignment::Model>> {
    if payload_ids.is_empty() {
        return Ok(Vec::new());
    }

    if client_drone_assignment::Entity::find_by_id(assignment_id)
        .one(db)
        .await?
        .is_none()
    {
        return Err(HangarError::AssignmentNotFound(assignment_id).into());
    }
    resolve_payloads(db, payload_ids).await?;

    let tx = db.begin().await?;
    let mut inserted = Vec::with_capacity(payload_ids.len());
    for payload_id in payload_ids {
        inserted.push(
            drone_payload_assignment::ActiveModel {
                assignment_id: Set(assignment_id),
                payload_id: Set(*payload_id),
                ..Default::default()
            }
            .insert(&tx)
            .await?,
        );
    }
    tx.commit().await?;

    Ok(inserted)
}

/// Update an assignment's quantity.
///
/// Zero means "the client no longer has this drone" and delegates to
/// `delete`; the returned model is `None` in that case.
pub async fn update_quantity(
    db: &DatabaseConnection,
    assignment_id: i64,
    quantity: i32,
) -> anyhow::Result<Option<client_drone_assignment::Model>> {
    if quantity < 0 {
        return Err(
            HangarError::Validation(format!("quantity must be >= 0, got {}", quantity)).into(),
        );
    }
    if quantity == 0 {
        delete(db, assignment_id).await?;
        return Ok(None);
    }

    let entity = client_drone_assignment::Entity::find_by_id(assignment_id)
        .one(db)
        .await?
        .ok_or(HangarError::AssignmentNotFound(assignment_id))?;

    let mut active: client_drone_assignment::ActiveModel = entity.into();
    active.quantity = Set(quantity);
    Ok(Some(active.update(db).await?))
}

/// Delete an assignment and its payload rows in one transaction.
pub async fn delete(db: &DatabaseConnection, assignment_id: i64) -> anyhow::Result<bool> {
    if client_drone_assignment::Entity::find_by_id(assignment_id)
        .one(db)
        .await?
        .is_none()
    {
        return Err(HangarError::AssignmentNotFound(assignment_id).into());
    }

    let tx = db.begin().await?;

    drone_payload_assignment::Entity::delete_many()
        .filter(drone_payload_assignment::Column::AssignmentId.eq(assignment_id))
        .exec(&tx)
        .await?;

    let res = client_drone_assignment::Entity::delete_by_id(assignment_id)
        .exec(&tx)
        .await?;

    tx.commit().await?;

    tracing::info!(assignment_id, "assignment deleted");
    Ok(res.rows_affected > 0)
}

/// List a client's assignments with drones and payloads resolved.
///
/// Two queries merged in application code rather than one three-way join:
/// the relation loader would fan out one row per payload and duplicate the
/// assignment columns.
pub async fn list_for_client(
    db: &DatabaseConnection,
    client_id: &str,
) -> anyhow::Result<Vec<AssignmentView>> {
    let assignments = client_drone_assignment::Entity::find()
        .filter(client_drone_assignment::Column::ClientId.eq(client_id))
        .find_also_related(drone::Entity)
        .all(db)
        .await?;

    let assignment_ids: Vec<i64> = assignments.iter().map(|(a, _)| a.id).collect();

    let mut payloads_by_assignment: HashMap<i64, Vec<CatalogRef>> = HashMap::new();
    if !assignment_ids.is_empty() {
        let payload_rows = drone_payload_assignment::Entity::find()
            .filter(drone_payload_assignment::Column::AssignmentId.is_in(assignment_ids))
            .find_also_related(payload::Entity)
            .all(db)
            .await?;

        for (row, payload) in payload_rows {
            let Some(payload) = payload else { continue };
            payloads_by_assignment
                .entry(row.assignment_id)
                .or_default()
                .push(CatalogRef {
                    id: payload.id,
                    name: payload.name,
                });
        }
    }

    let mut views = Vec::with_capacity(assignments.len());
    for (assignment, drone) in assignments {
        let drone = drone.ok_or_else(|| {
            HangarError::Database(format!(
                "assignment {} references missing drone {}",
                assignment.id, assignment.drone_id
            ))
        })?;
        let mut payloads = payloads_by_assignment
            .remove(&assignment.id)
            .unwrap_or_default();
        payloads.sort_by_key(|p| p.id);
        views.push(AssignmentView {
            id: assignment.id,
            client_id: assignment.client_id,
            drone: CatalogRef {
                id: drone.id,
                name: drone.name,
            },
            quantity: assignment.quantity,
            payloads,
            gmt_create: assignment.gmt_create,
        });
    }
    views.sort_by_key(|v| v.id);

    Ok(views)
}

/// Detach one payload from one assignment.
///
/// Scoped to a single assignment: a payload shared by several assignments
/// stays attached everywhere else.
pub async fn remove_payload(
    db: &DatabaseConnection,
    assignment_id: i64,
    payload_id: i64,
) -> anyhow::Result<bool> {
    let res = drone_payload_assignment::Entity::delete_many()
        .filter(drone_payload_assignment::Column::AssignmentId.eq(assignment_id))
        .filter(drone_payload_assignment::Column::PayloadId.eq(payload_id))
        .exec(db)
        .await?;

    Ok(res.rows_affected > 0)
}

async fn resolve_payloads(
    db: &DatabaseConnection,
    payload_ids: &[i64],
) -> anyhow::Result<Vec<CatalogRef>> {
    if payload_ids.is_empty() {
        return Ok(Vec::new());
    }

    let found = payload::Entity::find()
        .filter(payload::Column::Id.is_in(payload_ids.to_vec()))
        .all(db)
        .await?;

    for payload_id in payload_ids {
        if !found.iter().any(|p| p.id == *payload_id) {
            return Err(HangarError::PayloadNotFound(*payload_id).into());
        }
    }

    Ok(found
        .into_iter()
        .map(|p| CatalogRef {
            id: p.id,
            name: p.name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewClient;
    use crate::service::client as client_service;
    use crate::service::test_support::{seed_catalog, test_db};

    async fn registered_client(db: &DatabaseConnection) -> String {
        client_service::create(
            db,
            NewClient {
                name: "Acme".to_string(),
                email: "a@acme.com".to_string(),
                address: "1 Main St".to_string(),
                vm_ip: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_and_list_scenario() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;

        let created = create(&db, &client_id, 5, 2, &[]).await.unwrap();
        assign_payloads(&db, created.id, &[7, 8]).await.unwrap();

        let views = list_for_client(&db, &client_id).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].quantity, 2);
        assert_eq!(views[0].drone.id, 5);
        let payload_ids: Vec<i64> = views[0].payloads.iter().map(|p| p.id).collect();
        assert_eq!(payload_ids, vec![7, 8]);
    }

    #[tokio::test]
    async fn test_create_rejects_quantity_below_one() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;

        for quantity in [0, -1, -100] {
            let err = create(&db, &client_id, 5, quantity, &[]).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<HangarError>(),
                Some(HangarError::Validation(_))
            ));
        }
        assert!(list_for_client(&db, &client_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_unknown_payload_inserts_nothing() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;

        let err = create(&db, &client_id, 5, 1, &[7, 999]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HangarError>(),
            Some(HangarError::PayloadNotFound(999))
        ));
        assert!(list_for_client(&db, &client_id).await.unwrap().is_empty());
        assert!(
            drone_payload_assignment::Entity::find()
                .all(&db)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_create_checks_client_and_drone() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;

        assert!(create(&db, "ghost", 5, 1, &[]).await.is_err());
        let err = create(&db, &client_id, 404, 1, &[]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HangarError>(),
            Some(HangarError::DroneNotFound(404))
        ));
    }

    #[tokio::test]
    async fn test_assign_payloads_empty_is_noop() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;
        let created = create(&db, &client_id, 5, 1, &[]).await.unwrap();

        let inserted = assign_payloads(&db, created.id, &[]).await.unwrap();
        assert!(inserted.is_empty());

        // Missing assignments only matter when there is something to insert
        assert!(assign_payloads(&db, 999, &[]).await.unwrap().is_empty());
        assert!(assign_payloads(&db, 999, &[7]).await.is_err());
    }

    #[tokio::test]
    async fn test_update_quantity_zero_deletes() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;
        let created = create(&db, &client_id, 5, 2, &[7]).await.unwrap();

        let updated = update_quantity(&db, created.id, 0).await.unwrap();
        assert!(updated.is_none());
        assert!(list_for_client(&db, &client_id).await.unwrap().is_empty());
        assert!(
            drone_payload_assignment::Entity::find()
                .all(&db)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_update_quantity_negative_rejected() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;
        let created = create(&db, &client_id, 5, 2, &[]).await.unwrap();

        assert!(update_quantity(&db, created.id, -1).await.is_err());
        let views = list_for_client(&db, &client_id).await.unwrap();
        assert_eq!(views[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_update_quantity_in_place() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;
        let created = create(&db, &client_id, 5, 2, &[]).await.unwrap();

        let updated = update_quantity(&db, created.id, 7).await.unwrap().unwrap();
        assert_eq!(updated.quantity, 7);
    }

    #[tokio::test]
    async fn test_delete_removes_payload_rows() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;
        let created = create(&db, &client_id, 5, 1, &[7, 8]).await.unwrap();

        assert!(delete(&db, created.id).await.unwrap());
        assert!(
            drone_payload_assignment::Entity::find()
                .all(&db)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_remove_payload_is_assignment_scoped() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let client_id = registered_client(&db).await;
        let first = create(&db, &client_id, 5, 1, &[7, 8]).await.unwrap();
        let second = create(&db, &client_id, 6, 1, &[7]).await.unwrap();

        assert!(remove_payload(&db, first.id, 7).await.unwrap());

        let views = list_for_client(&db, &client_id).await.unwrap();
        let first_view = views.iter().find(|v| v.id == first.id).unwrap();
        let second_view = views.iter().find(|v| v.id == second.id).unwrap();
        assert_eq!(first_view.payloads.iter().map(|p| p.id).collect::<Vec<_>>(), vec![8]);
        // The shared payload stays on the other assignment
        assert_eq!(second_view.payloads.iter().map(|p| p.id).collect::<Vec<_>>(), vec![7]);

        // Removing again reports nothing deleted
        assert!(!remove_payload(&db, first.id, 7).await.unwrap());
    }
}
