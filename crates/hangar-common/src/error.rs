//! Error types and error codes for Hangar
//!
//! This module defines:
//! - `HangarError`: Application-specific error enum
//! - `ErrorCode`: Structured error codes for API responses

use serde::{Deserialize, Serialize};

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum HangarError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("drone '{0}' not found")]
    DroneNotFound(i64),

    #[error("payload '{0}' not found")]
    PayloadNotFound(i64),

    #[error("assignment '{0}' not found")]
    AssignmentNotFound(i64),

    #[error("email '{0}' already registered")]
    EmailConflict(String),

    #[error("a VM key file is already stored for client '{0}'")]
    PemConflict(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

// General success and error codes
pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const PARAMETER_MISSING: ErrorCode<'static> = ErrorCode {
    code: 10000,
    message: "parameter missing",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10001,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 10003,
    message: "resource conflict",
};

// Registry errors
pub const CLIENT_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20000,
    message: "client not found",
};

pub const EMAIL_ALREADY_REGISTERED: ErrorCode<'static> = ErrorCode {
    code: 20001,
    message: "email already registered",
};

pub const ASSIGNMENT_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 21000,
    message: "assignment not found",
};

pub const DRONE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 21001,
    message: "drone not found",
};

pub const PAYLOAD_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 21002,
    message: "payload not found",
};

// VM credential errors
pub const VM_KEY_ALREADY_PRESENT: ErrorCode<'static> = ErrorCode {
    code: 22000,
    message: "VM key file already present",
};

// Storage errors
pub const STORAGE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 23000,
    message: "object storage error",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hangar_error_display() {
        let err = HangarError::Validation("email is malformed".to_string());
        assert_eq!(format!("{}", err), "validation failed: email is malformed");

        let err = HangarError::ClientNotFound("c1".to_string());
        assert_eq!(format!("{}", err), "client 'c1' not found");

        let err = HangarError::EmailConflict("a@acme.com".to_string());
        assert_eq!(format!("{}", err), "email 'a@acme.com' already registered");

        let err = HangarError::AssignmentNotFound(42);
        assert_eq!(format!("{}", err), "assignment '42' not found");
    }

    #[test]
    fn test_error_code_constants() {
        assert_eq!(SUCCESS.code, 0);
        assert_eq!(SUCCESS.message, "success");
        assert_eq!(PARAMETER_MISSING.code, 10000);
        assert_eq!(CLIENT_NOT_FOUND.code, 20000);
        assert_eq!(SERVER_ERROR.code, 30000);
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = HangarError::PemConflict("c1".to_string()).into();
        assert!(matches!(
            err.downcast_ref::<HangarError>(),
            Some(HangarError::PemConflict(_))
        ));
    }
}
