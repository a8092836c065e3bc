//! Registry service layer
//!
//! Free async functions over a `DatabaseConnection` (and, where files are
//! involved, an `ObjectStore`). Handlers call these; nothing here touches
//! HTTP types.

pub mod assignment;
pub mod catalog;
pub mod client;
pub mod vm;

use hangar_common::HangarError;
use validator::ValidationError;

/// Shape a field validation failure into the domain error.
pub(crate) fn invalid(field: &str, err: ValidationError) -> HangarError {
    HangarError::Validation(format!("{}: {}", field, err.code))
}
