//! Mission/image file console endpoints
//!
//! Uploads arrive as multipart forms with `clientId` and `kind` text fields
//! next to the file part. Every other operation addresses files by the full
//! object path returned from `list`.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, Responder, Scope, delete, get, post, web};
use serde::Deserialize;

use hangar_registry::service::client;
use hangar_storage::files::{self, FileKind};

use crate::model::ApiResult;
use crate::state::AppState;
use crate::v1::UploadForm;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParam {
    pub client_id: String,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlParam {
    pub client_id: String,
    pub kind: String,
    pub path: String,
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParam {
    pub client_id: String,
    pub kind: String,
    pub path: String,
}

fn parse_kind(raw: &str) -> Result<FileKind, HttpResponse> {
    FileKind::parse(raw).map_err(|e| ApiResult::http_error(&e.into()))
}

#[post("upload")]
pub async fn upload_file(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let form = match UploadForm::read(payload).await {
        Ok(form) => form,
        Err(err) => return ApiResult::http_error(&err),
    };

    let Some(client_id) = form.value("clientId") else {
        return ApiResult::http_param_missing("clientId");
    };
    let Some(kind) = form.value("kind") else {
        return ApiResult::http_param_missing("kind");
    };
    let kind = match parse_kind(kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let Some((filename, bytes)) = form.file.clone() else {
        return ApiResult::http_param_missing("file");
    };

    // The path convention scopes by client id; make sure it is a real one
    if let Err(err) = client::get_by_id(&state.db, client_id).await {
        return ApiResult::http_error(&err);
    }

    match files::upload(state.store.as_ref(), client_id, kind, &filename, bytes).await {
        Ok(stored) => ApiResult::http_success(stored),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[get("list")]
pub async fn list_files(
    state: web::Data<AppState>,
    params: web::Query<ListParam>,
) -> impl Responder {
    let kind = match parse_kind(&params.kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match files::list(state.store.as_ref(), &params.client_id, kind).await {
        Ok(listed) => ApiResult::http_success(listed),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[get("url")]
pub async fn signed_url(
    state: web::Data<AppState>,
    params: web::Query<UrlParam>,
) -> impl Responder {
    let kind = match parse_kind(&params.kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match files::signed_url(
        state.store.as_ref(),
        &params.client_id,
        kind,
        &params.path,
        params.ttl_secs,
    )
    .await
    {
        Ok(url) => ApiResult::http_success(url),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[delete("")]
pub async fn delete_file(
    state: web::Data<AppState>,
    params: web::Query<DeleteParam>,
) -> impl Responder {
    let kind = match parse_kind(&params.kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match files::delete(state.store.as_ref(), &params.client_id, kind, &params.path).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(&err),
    }
}

pub fn routes() -> Scope {
    web::scope("/file")
        .service(upload_file)
        .service(list_files)
        .service(signed_url)
        .service(delete_file)
}
