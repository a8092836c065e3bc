//! Main entry point for the Hangar fleet administration server.
//!
//! Loads configuration, initializes logging, connects the database and the
//! object store, then serves the console API.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;

use hangar_console::{AppState, v1_routes};
use hangar_registry::ClientCache;
use hangar_server::model::Configuration;
use hangar_server::model::constants::STORAGE_MODE_S3;
use hangar_server::startup;
use hangar_storage::{FsObjectStore, ObjectStore, S3ObjectStore};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new();
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let db = configuration.database_connection().await?;
    if configuration.is_standalone() {
        info!("standalone mode: applying schema to {}", configuration.database_url());
        hangar_persistence::create_schema(&db).await?;
    }

    let store: Arc<dyn ObjectStore> = if configuration.storage_mode() == STORAGE_MODE_S3 {
        Arc::new(S3ObjectStore::connect(&configuration.s3_settings()).await)
    } else {
        info!("local object storage under {}", configuration.data_dir());
        Arc::new(FsObjectStore::new(configuration.data_dir()))
    };

    let client_cache = Arc::new(ClientCache::with_system_clock(
        configuration.client_cache_ttl(),
    ));
    let state = AppState::new(db, store, client_cache);

    let address = configuration.server_address();
    let port = configuration.server_port();
    info!("Hangar console listening on {}:{}", address, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(v1_routes())
    })
    .bind((address.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
