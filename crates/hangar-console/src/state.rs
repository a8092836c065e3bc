//! Shared application state handed to every console handler

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use hangar_registry::ClientCache;
use hangar_storage::ObjectStore;

/// State shared across workers. Cheap to clone; every member is a handle.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store: Arc<dyn ObjectStore>,
    pub client_cache: Arc<ClientCache>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        store: Arc<dyn ObjectStore>,
        client_cache: Arc<ClientCache>,
    ) -> Self {
        Self {
            db,
            store,
            client_cache,
        }
    }
}
