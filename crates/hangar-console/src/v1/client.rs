//! Client registry console endpoints

use actix_web::{Responder, Scope, delete, get, post, put, web};
use serde::Deserialize;

use hangar_registry::model::{ClientPatch, NewClient};
use hangar_registry::service::client;

use crate::model::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParam {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParam {
    pub limit: Option<usize>,
    pub newest_first: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormData {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub vm_ip: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormData {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub vm_ip: Option<String>,
}

#[get("")]
pub async fn get_client(
    state: web::Data<AppState>,
    params: web::Query<GetParam>,
) -> impl Responder {
    match client::get_by_id(&state.db, &params.id).await {
        Ok(found) => ApiResult::http_success(found),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[get("list")]
pub async fn list_clients(
    state: web::Data<AppState>,
    params: web::Query<ListParam>,
) -> impl Responder {
    let newest_first = params.newest_first.unwrap_or(true);

    // Only the default newest-first view goes through the cache; the
    // explicit oldest-first ordering is rare enough to hit the database
    if !newest_first {
        return match client::list_all(&state.db, params.limit, false).await {
            Ok(clients) => ApiResult::http_success(clients),
            Err(err) => ApiResult::http_error(&err),
        };
    }

    let mut clients = match state.client_cache.get() {
        Some(cached) => cached,
        None => match client::list_all(&state.db, None, true).await {
            Ok(clients) => {
                state.client_cache.put(clients.clone());
                clients
            }
            Err(err) => return ApiResult::http_error(&err),
        },
    };

    if let Some(limit) = params.limit {
        clients.truncate(limit);
    }
    ApiResult::http_success(clients)
}

#[post("")]
pub async fn create_client(
    state: web::Data<AppState>,
    form: web::Form<CreateFormData>,
) -> impl Responder {
    let form = form.into_inner();
    if form.name.trim().is_empty() {
        return ApiResult::http_param_missing("name");
    }
    if form.email.trim().is_empty() {
        return ApiResult::http_param_missing("email");
    }

    let input = NewClient {
        name: form.name,
        email: form.email.trim().to_string(),
        address: form.address.unwrap_or_default(),
        vm_ip: form.vm_ip,
    };

    match client::create(&state.db, input).await {
        Ok(created) => {
            state.client_cache.invalidate();
            ApiResult::http_success(created)
        }
        Err(err) => ApiResult::http_error(&err),
    }
}

#[put("")]
pub async fn update_client(
    state: web::Data<AppState>,
    form: web::Form<UpdateFormData>,
) -> impl Responder {
    let form = form.into_inner();
    if form.id.is_empty() {
        return ApiResult::http_param_missing("id");
    }

    let patch = ClientPatch {
        name: form.name,
        email: form.email,
        address: form.address,
        vm_ip: form.vm_ip,
    };

    match client::update(&state.db, &form.id, patch).await {
        Ok(updated) => {
            state.client_cache.invalidate();
            ApiResult::http_success(updated)
        }
        Err(err) => ApiResult::http_error(&err),
    }
}

#[delete("")]
pub async fn delete_client(
    state: web::Data<AppState>,
    params: web::Query<GetParam>,
) -> impl Responder {
    match client::delete(&state.db, &params.id).await {
        Ok(deleted) => {
            state.client_cache.invalidate();
            ApiResult::http_success(deleted)
        }
        Err(err) => ApiResult::http_error(&err),
    }
}

pub fn routes() -> Scope {
    web::scope("/client")
        .service(list_clients)
        .service(get_client)
        .service(create_client)
        .service(update_client)
        .service(delete_client)
}
