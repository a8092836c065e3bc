//! Console API envelope
//!
//! Every handler answers with an `ApiResult<T>`: a numeric code, a short
//! message and the payload (or the error detail). The HTTP status and the
//! code both derive from the domain error, so clients can branch on either.

use actix_web::{HttpResponse, http::StatusCode};
use serde::{Deserialize, Serialize};

use hangar_common::{HangarError, error};

/// API result wrapper
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error::SUCCESS.code,
            message: error::SUCCESS.message.to_string(),
            data,
        }
    }

    pub fn http_success(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::success(data))
    }

    pub fn http_response(status: u16, code: i32, message: String, data: T) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
        .json(Self {
            code,
            message,
            data,
        })
    }
}

impl ApiResult<String> {
    /// Map a service error onto status, code and message.
    pub fn http_error(err: &anyhow::Error) -> HttpResponse {
        let (status, code) = match err.downcast_ref::<HangarError>() {
            Some(HangarError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, error::PARAMETER_VALIDATE_ERROR)
            }
            Some(HangarError::ClientNotFound(_)) => {
                (StatusCode::NOT_FOUND, error::CLIENT_NOT_FOUND)
            }
            Some(HangarError::DroneNotFound(_)) => (StatusCode::NOT_FOUND, error::DRONE_NOT_FOUND),
            Some(HangarError::PayloadNotFound(_)) => {
                (StatusCode::NOT_FOUND, error::PAYLOAD_NOT_FOUND)
            }
            Some(HangarError::AssignmentNotFound(_)) => {
                (StatusCode::NOT_FOUND, error::ASSIGNMENT_NOT_FOUND)
            }
            Some(HangarError::EmailConflict(_)) => {
                (StatusCode::CONFLICT, error::EMAIL_ALREADY_REGISTERED)
            }
            Some(HangarError::PemConflict(_)) => {
                (StatusCode::CONFLICT, error::VM_KEY_ALREADY_PRESENT)
            }
            Some(HangarError::Storage(_)) => (StatusCode::BAD_GATEWAY, error::STORAGE_ERROR),
            Some(HangarError::Database(_)) | Some(HangarError::Internal(_)) | None => {
                (StatusCode::INTERNAL_SERVER_ERROR, error::SERVER_ERROR)
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %err, "console request failed");
        }

        HttpResponse::build(status).json(Self {
            code: code.code,
            message: code.message.to_string(),
            data: err.to_string(),
        })
    }

    /// Create a parameter missing error response
    pub fn http_param_missing(param_name: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(Self {
            code: error::PARAMETER_MISSING.code,
            message: error::PARAMETER_MISSING.message.to_string(),
            data: format!(
                "Required parameter '{}' type String is not present",
                param_name
            ),
        })
    }
}
