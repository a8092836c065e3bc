//! Test environment: in-memory database plus filesystem object store
//!
//! Mirrors what standalone mode wires up at startup, minus the HTTP layer.

use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use tempfile::TempDir;

use hangar_persistence::entity::{drone, payload};
use hangar_persistence::schema::create_schema;
use hangar_storage::FsObjectStore;

pub struct TestEnv {
    pub db: DatabaseConnection,
    pub store: FsObjectStore,
    // Holds the store's backing directory for the test's lifetime
    _data_dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should connect");
        create_schema(&db).await.expect("schema should apply");

        let data_dir = TempDir::new().expect("temp dir should create");
        let store = FsObjectStore::new(data_dir.path());

        Self {
            db,
            store,
            _data_dir: data_dir,
        }
    }

    /// Seed the drone/payload catalogs the way operations tooling would.
    pub async fn seed_catalog(&self) {
        for (id, name) in [(5, "Condor X4"), (6, "Wasp Mini")] {
            drone::ActiveModel {
                id: Set(id),
                name: Set(name.to_string()),
            }
            .insert(&self.db)
            .await
            .unwrap();
        }
        for (id, name) in [(7, "Thermal Camera"), (8, "Lidar Pod")] {
            payload::ActiveModel {
                id: Set(id),
                name: Set(name.to_string()),
            }
            .insert(&self.db)
            .await
            .unwrap();
        }
    }
}
