//! Schema bootstrap for standalone mode and tests
//!
//! Production deployments run against MySQL/PostgreSQL with the schema
//! provisioned by operations tooling. Standalone mode and the test suites
//! run against SQLite and create the tables here. Cascading deletes are
//! deliberately absent from the DDL: the service layer owns them inside
//! explicit transactions.

use sea_orm::{ConnectionTrait, DbConn};

const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS client (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        address TEXT NOT NULL,
        vm_ip TEXT,
        vm_password TEXT,
        gmt_create TEXT NOT NULL,
        gmt_modified TEXT NOT NULL
    );",
    "CREATE TABLE IF NOT EXISTS drone (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );",
    "CREATE TABLE IF NOT EXISTS payload (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );",
    "CREATE TABLE IF NOT EXISTS client_drone_assignment (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id TEXT NOT NULL,
        drone_id INTEGER NOT NULL,
        quantity INTEGER NOT NULL,
        gmt_create TEXT NOT NULL,
        FOREIGN KEY(client_id) REFERENCES client(id),
        FOREIGN KEY(drone_id) REFERENCES drone(id)
    );",
    "CREATE TABLE IF NOT EXISTS drone_payload_assignment (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        assignment_id INTEGER NOT NULL,
        payload_id INTEGER NOT NULL,
        FOREIGN KEY(assignment_id) REFERENCES client_drone_assignment(id),
        FOREIGN KEY(payload_id) REFERENCES payload(id)
    );",
];

/// Create all Hangar tables if they do not exist yet.
pub async fn create_schema(db: &DbConn) -> anyhow::Result<()> {
    for statement in CREATE_TABLES {
        db.execute_unprepared(statement).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, Database, EntityTrait, Set};

    use super::*;
    use crate::entity::client;

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();
        create_schema(&db).await.unwrap();
    }

    #[tokio::test]
    async fn test_client_roundtrip() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();

        let now = Utc::now();
        client::ActiveModel {
            id: Set("c1".to_string()),
            name: Set("Acme".to_string()),
            email: Set("a@acme.com".to_string()),
            address: Set("1 Main St".to_string()),
            vm_ip: Set(None),
            vm_password: Set(None),
            gmt_create: Set(now),
            gmt_modified: Set(now),
        }
        .insert(&db)
        .await
        .unwrap();

        let found = client::Entity::find_by_id("c1").one(&db).await.unwrap();
        assert_eq!(found.unwrap().email, "a@acme.com");
    }
}
