//! VM credential console endpoints

use actix_multipart::Multipart;
use actix_web::{Responder, Scope, delete, get, post, put, web};
use serde::Deserialize;

use hangar_registry::service::vm;

use crate::model::ApiResult;
use crate::state::AppState;
use crate::v1::UploadForm;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientParam {
    pub client_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressFormData {
    pub client_id: String,
    pub ip: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessFormData {
    pub client_id: String,
    pub ip: String,
    pub password: String,
}

#[put("address")]
pub async fn set_address(
    state: web::Data<AppState>,
    form: web::Form<AddressFormData>,
) -> impl Responder {
    match vm::set_address(&state.db, &form.client_id, &form.ip).await {
        Ok(updated) => ApiResult::http_success(updated),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[put("access")]
pub async fn set_access(
    state: web::Data<AppState>,
    form: web::Form<AccessFormData>,
) -> impl Responder {
    match vm::set_access(
        &state.db,
        state.store.as_ref(),
        &form.client_id,
        &form.ip,
        &form.password,
    )
    .await
    {
        Ok(updated) => ApiResult::http_success(updated),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[get("pem")]
pub async fn check_pem(
    state: web::Data<AppState>,
    params: web::Query<ClientParam>,
) -> impl Responder {
    match vm::check_pem(state.store.as_ref(), &params.client_id).await {
        Ok(stored) => ApiResult::http_success(stored),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[post("pem")]
pub async fn upload_pem(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let form = match UploadForm::read(payload).await {
        Ok(form) => form,
        Err(err) => return ApiResult::http_error(&err),
    };

    let Some(client_id) = form.value("clientId") else {
        return ApiResult::http_param_missing("clientId");
    };
    let Some((filename, bytes)) = form.file.clone() else {
        return ApiResult::http_param_missing("file");
    };

    match vm::upload_pem(&state.db, state.store.as_ref(), client_id, &filename, bytes).await {
        Ok(stored) => ApiResult::http_success(stored),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[delete("pem")]
pub async fn delete_pem(
    state: web::Data<AppState>,
    params: web::Query<ClientParam>,
) -> impl Responder {
    match vm::delete_pem(state.store.as_ref(), &params.client_id).await {
        Ok(removed) => ApiResult::http_success(removed),
        Err(err) => ApiResult::http_error(&err),
    }
}

pub fn routes() -> Scope {
    web::scope("/vm")
        .service(set_address)
        .service(set_access)
        .service(check_pem)
        .service(upload_pem)
        .service(delete_pem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_form_deserialization() {
        let json = r#"{"clientId": "c1", "ip": "10.0.0.1:22", "password": "hunter2"}"#;
        let form: AccessFormData = serde_json::from_str(json).unwrap();
        assert_eq!(form.client_id, "c1");
        assert_eq!(form.ip, "10.0.0.1:22");
        assert_eq!(form.password, "hunter2");
    }

    #[test]
    fn test_access_form_requires_password() {
        assert!(
            serde_json::from_str::<AccessFormData>(r#"{"clientId": "c1", "ip": "10.0.0.1"}"#)
                .is_err()
        );
    }
}
