//! Console V1 routing configuration

use actix_web::{Scope, web};

use super::{assignment, catalog, client, file, health, vm};

/// Create the v1 console routes
pub fn routes() -> Scope {
    web::scope("/hangar/v1/console")
        .service(client::routes())
        .service(assignment::routes())
        .service(catalog::routes())
        .service(file::routes())
        .service(vm::routes())
        .service(health::routes())
}
