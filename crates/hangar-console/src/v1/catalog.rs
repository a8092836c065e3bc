//! Catalog console endpoints

use actix_web::{Responder, Scope, get, web};

use hangar_registry::service::catalog;

use crate::model::ApiResult;
use crate::state::AppState;

#[get("drone/list")]
pub async fn list_drones(state: web::Data<AppState>) -> impl Responder {
    match catalog::list_drones(&state.db).await {
        Ok(drones) => ApiResult::http_success(drones),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[get("payload/list")]
pub async fn list_payloads(state: web::Data<AppState>) -> impl Responder {
    match catalog::list_payloads(&state.db).await {
        Ok(payloads) => ApiResult::http_success(payloads),
        Err(err) => ApiResult::http_error(&err),
    }
}

pub fn routes() -> Scope {
    web::scope("/catalog")
        .service(list_drones)
        .service(list_payloads)
}
