//! Health console endpoints

use actix_web::{HttpResponse, Responder, Scope, get, web};

use crate::model::ApiResult;
use crate::state::AppState;

#[get("liveness")]
pub async fn liveness() -> impl Responder {
    ApiResult::http_success("UP".to_string())
}

#[get("readiness")]
pub async fn readiness(state: web::Data<AppState>) -> impl Responder {
    match state.db.ping().await {
        Ok(()) => ApiResult::http_success("UP".to_string()),
        Err(err) => HttpResponse::ServiceUnavailable().json(ApiResult {
            code: hangar_common::error::SERVER_ERROR.code,
            message: hangar_common::error::SERVER_ERROR.message.to_string(),
            data: err.to_string(),
        }),
    }
}

pub fn routes() -> Scope {
    web::scope("/health").service(liveness).service(readiness)
}
