//! Console V1 endpoints

pub mod assignment;
pub mod catalog;
pub mod client;
pub mod file;
pub mod health;
pub mod route;
pub mod vm;

use std::collections::HashMap;

use actix_multipart::Multipart;
use bytes::Bytes;
use futures::TryStreamExt;

use hangar_common::HangarError;

/// Hard cap on a single multipart upload, above any per-kind limit
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// A parsed multipart form: text fields plus at most one file part.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub values: HashMap<String, String>,
    pub file: Option<(String, Bytes)>,
}

impl UploadForm {
    /// Drain the multipart stream into memory.
    ///
    /// Parts without a field name are skipped; a part with a filename is the
    /// file, everything else is a text field.
    pub async fn read(mut payload: Multipart) -> anyhow::Result<Self> {
        let mut form = UploadForm::default();
        let mut total = 0usize;

        while let Some(mut field) = payload
            .try_next()
            .await
            .map_err(|e| HangarError::Validation(format!("malformed multipart body: {}", e)))?
        {
            let Some(disposition) = field.content_disposition() else {
                continue;
            };
            let Some(name) = disposition.get_name().map(str::to_string) else {
                continue;
            };
            let filename = disposition.get_filename().map(str::to_string);

            let mut data = Vec::new();
            while let Some(chunk) = field
                .try_next()
                .await
                .map_err(|e| HangarError::Validation(format!("malformed multipart body: {}", e)))?
            {
                total += chunk.len();
                if total > MAX_UPLOAD_BYTES {
                    return Err(HangarError::Validation(format!(
                        "upload exceeds the {} byte limit",
                        MAX_UPLOAD_BYTES
                    ))
                    .into());
                }
                data.extend_from_slice(&chunk);
            }

            match filename {
                Some(filename) => form.file = Some((filename, Bytes::from(data))),
                None => {
                    let value = String::from_utf8(data).map_err(|_| {
                        HangarError::Validation(format!("field '{}' is not valid UTF-8", name))
                    })?;
                    form.values.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
