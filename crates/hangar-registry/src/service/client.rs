//! Client registry service layer
//!
//! CRUD for client records. The client row is the root aggregate: deleting
//! one cascades over its drone assignments and their payload rows inside a
//! single transaction, so a crash can never leave orphaned join rows.

use sea_orm::*;

use hangar_common::HangarError;
use hangar_common::validation::{
    validate_address, validate_email, validate_name, validate_vm_addr,
};
use hangar_persistence::entity::{client, client_drone_assignment, drone_payload_assignment};

use super::invalid;
use crate::model::{ClientPatch, NewClient};

/// Register a new client.
///
/// The email existence check runs before the insert so the caller gets the
/// conflict error rather than a bare database error; the unique index
/// backstops concurrent registrations.
pub async fn create(db: &DatabaseConnection, input: NewClient) -> anyhow::Result<client::Model> {
    validate_name(&input.name).map_err(|e| invalid("name", e))?;
    validate_email(&input.email).map_err(|e| invalid("email", e))?;
    validate_address(&input.address).map_err(|e| invalid("address", e))?;
    if let Some(vm_ip) = &input.vm_ip {
        validate_vm_addr(vm_ip).map_err(|e| invalid("vmIp", e))?;
    }

    let existing = client::Entity::find()
        .filter(client::Column::Email.eq(input.email.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(HangarError::EmailConflict(input.email).into());
    }

    let now = chrono::Utc::now();
    let created = client::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(input.name.trim().to_string()),
        email: Set(input.email),
        address: Set(input.address),
        vm_ip: Set(input.vm_ip),
        vm_password: Set(None),
        gmt_create: Set(now),
        gmt_modified: Set(now),
    }
    .insert(db)
    .await?;

    tracing::info!(client_id = %created.id, "client registered");
    Ok(created)
}

/// Merge the provided fields into an existing client.
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    patch: ClientPatch,
) -> anyhow::Result<client::Model> {
    let entity = client::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HangarError::ClientNotFound(id.to_string()))?;

    if let Some(email) = &patch.email {
        validate_email(email).map_err(|e| invalid("email", e))?;
        if *email != entity.email {
            let taken = client::Entity::find()
                .filter(client::Column::Email.eq(email.as_str()))
                .one(db)
                .await?;
            if taken.is_some() {
                return Err(HangarError::EmailConflict(email.clone()).into());
            }
        }
    }

    let mut active: client::ActiveModel = entity.into();

    if let Some(name) = patch.name {
        validate_name(&name).map_err(|e| invalid("name", e))?;
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = patch.email {
        active.email = Set(email);
    }
    if let Some(address) = patch.address {
        validate_address(&address).map_err(|e| invalid("address", e))?;
        active.address = Set(address);
    }
    if let Some(vm_ip) = patch.vm_ip {
        validate_vm_addr(&vm_ip).map_err(|e| invalid("vmIp", e))?;
        active.vm_ip = Set(Some(vm_ip));
    }

    if active.is_changed() {
        active.gmt_modified = Set(chrono::Utc::now());
        Ok(active.update(db).await?)
    } else {
        Ok(active.try_into_model()?)
    }
}

/// Delete a client and everything it owns.
///
/// Payload-assignment rows, assignment rows and the client row go in one
/// transaction.
pub async fn delete(db: &DatabaseConnection, id: &str) -> anyhow::Result<bool> {
    if client::Entity::find_by_id(id).one(db).await?.is_none() {
        return Err(HangarError::ClientNotFound(id.to_string()).into());
    }

    let assignment_ids: Vec<i64> = client_drone_assignment::Entity::find()
        .filter(client_drone_assignment::Column::ClientId.eq(id))
        .all(db)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();

    let tx = db.begin().await?;

    if !assignment_ids.is_empty() {
        drone_payload_assignment::Entity::delete_many()
            .filter(
                drone_payload_assignment::Column::AssignmentId.is_in(assignment_ids.clone()),
            )
            .exec(&tx)
            .await?;
        client_drone_assignment::Entity::delete_many()
            .filter(client_drone_assignment::Column::ClientId.eq(id))
            .exec(&tx)
            .await?;
    }

    let res = client::Entity::delete_by_id(id).exec(&tx).await?;

    tx.commit().await?;

    tracing::info!(
        client_id = id,
        assignments = assignment_ids.len(),
        "client deleted"
    );
    Ok(res.rows_affected > 0)
}

/// Get a client by id.
pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> anyhow::Result<client::Model> {
    client::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HangarError::ClientNotFound(id.to_string()).into())
}

/// List clients, optionally truncated.
///
/// Sorting happens in application code after the fetch, preserving the
/// observed behavior of the original console: the registry is small and the
/// newest-first view is the default everywhere.
pub async fn list_all(
    db: &DatabaseConnection,
    limit: Option<usize>,
    newest_first: bool,
) -> anyhow::Result<Vec<client::Model>> {
    let mut clients = client::Entity::find().all(db).await?;

    if newest_first {
        clients.sort_by(|a, b| b.gmt_create.cmp(&a.gmt_create).then(b.id.cmp(&a.id)));
    }
    if let Some(limit) = limit {
        clients.truncate(limit);
    }

    Ok(clients)
}
