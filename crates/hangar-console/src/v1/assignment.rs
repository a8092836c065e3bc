//! Assignment ledger console endpoints

use actix_web::{Responder, Scope, delete, get, post, put, web};
use serde::Deserialize;

use hangar_registry::service::assignment;

use crate::model::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParam {
    pub client_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParam {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormData {
    pub client_id: String,
    pub drone_id: i64,
    pub quantity: i32,
    /// Comma-separated payload ids, e.g. "7,8"
    pub payload_ids: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPayloadsFormData {
    pub assignment_id: i64,
    pub payload_ids: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityFormData {
    pub id: i64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePayloadParam {
    pub assignment_id: i64,
    pub payload_id: i64,
}

#[get("list")]
pub async fn list_assignments(
    state: web::Data<AppState>,
    params: web::Query<ListParam>,
) -> impl Responder {
    match assignment::list_for_client(&state.db, &params.client_id).await {
        Ok(views) => ApiResult::http_success(views),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[post("")]
pub async fn create_assignment(
    state: web::Data<AppState>,
    form: web::Form<CreateFormData>,
) -> impl Responder {
    if form.client_id.is_empty() {
        return ApiResult::http_param_missing("clientId");
    }

    let payload_ids = match parse_id_list(form.payload_ids.as_deref()) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    match assignment::create(
        &state.db,
        &form.client_id,
        form.drone_id,
        form.quantity,
        &payload_ids,
    )
    .await
    {
        Ok(view) => ApiResult::http_success(view),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[post("payload")]
pub async fn assign_payloads(
    state: web::Data<AppState>,
    form: web::Form<AssignPayloadsFormData>,
) -> impl Responder {
    let payload_ids = match parse_id_list(form.payload_ids.as_deref()) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    match assignment::assign_payloads(&state.db, form.assignment_id, &payload_ids).await {
        Ok(inserted) => ApiResult::http_success(inserted),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[put("quantity")]
pub async fn update_quantity(
    state: web::Data<AppState>,
    form: web::Form<QuantityFormData>,
) -> impl Responder {
    match assignment::update_quantity(&state.db, form.id, form.quantity).await {
        Ok(updated) => ApiResult::http_success(updated),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[delete("")]
pub async fn delete_assignment(
    state: web::Data<AppState>,
    params: web::Query<GetParam>,
) -> impl Responder {
    match assignment::delete(&state.db, params.id).await {
        Ok(deleted) => ApiResult::http_success(deleted),
        Err(err) => ApiResult::http_error(&err),
    }
}

#[delete("payload")]
pub async fn remove_payload(
    state: web::Data<AppState>,
    params: web::Query<RemovePayloadParam>,
) -> impl Responder {
    match assignment::remove_payload(&state.db, params.assignment_id, params.payload_id).await {
        Ok(removed) => ApiResult::http_success(removed),
        Err(err) => ApiResult::http_error(&err),
    }
}

/// Parse a comma-separated id list; empty and absent both mean "none".
fn parse_id_list(raw: Option<&str>) -> Result<Vec<i64>, actix_web::HttpResponse> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => {
                return Err(ApiResult::http_response(
                    400,
                    hangar_common::error::PARAMETER_VALIDATE_ERROR.code,
                    hangar_common::error::PARAMETER_VALIDATE_ERROR.message.to_string(),
                    format!("'{}' is not a numeric id", part),
                ));
            }
        }
    }
    Ok(ids)
}

pub fn routes() -> Scope {
    web::scope("/assignment")
        .service(list_assignments)
        .service(create_assignment)
        .service(assign_payloads)
        .service(update_quantity)
        .service(remove_payload)
        .service(delete_assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list(None).unwrap(), Vec::<i64>::new());
        assert_eq!(parse_id_list(Some("")).unwrap(), Vec::<i64>::new());
        assert_eq!(parse_id_list(Some("7")).unwrap(), vec![7]);
        assert_eq!(parse_id_list(Some("7,8")).unwrap(), vec![7, 8]);
        assert_eq!(parse_id_list(Some(" 7 , 8 ,")).unwrap(), vec![7, 8]);
        assert!(parse_id_list(Some("7,eight")).is_err());
    }

    #[test]
    fn test_create_form_deserialization() {
        let json = r#"{
            "clientId": "c1",
            "droneId": 5,
            "quantity": 2,
            "payloadIds": "7,8"
        }"#;
        let form: CreateFormData = serde_json::from_str(json).unwrap();
        assert_eq!(form.client_id, "c1");
        assert_eq!(form.drone_id, 5);
        assert_eq!(form.quantity, 2);
        assert_eq!(form.payload_ids.as_deref(), Some("7,8"));
    }

    #[test]
    fn test_remove_payload_param_requires_both_ids() {
        let params: RemovePayloadParam =
            serde_json::from_str(r#"{"assignmentId": 1, "payloadId": 7}"#).unwrap();
        assert_eq!(params.assignment_id, 1);
        assert_eq!(params.payload_id, 7);

        assert!(serde_json::from_str::<RemovePayloadParam>(r#"{"payloadId": 7}"#).is_err());
    }
}
