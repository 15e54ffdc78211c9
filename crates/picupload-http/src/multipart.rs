//! Adapts a multipart form to the upload pipeline.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::StatusCode;
use picupload_core::Uploader;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Form field the picture is expected in.
pub const FORM_FIELD: &str = "get_picture";

/// Store the file sent in the [`FORM_FIELD`] field of `multipart`.
///
/// A form without that file means there is nothing to upload: the result is
/// `Ok(None)`, not an error. Once the file part is found, failing to read it
/// is an [`ApiError::Form`]. Otherwise the file is transcoded on the blocking
/// pool and the stored path returned.
pub async fn upload_file(
    uploader: Arc<Uploader>,
    mut multipart: Multipart,
    location: String,
    id: String,
    width: u32,
) -> Result<Option<String>, ApiError> {
    let Some((filename, bytes)) = read_form_file(&mut multipart, FORM_FIELD).await? else {
        debug!("No {} file in form, nothing to upload", FORM_FIELD);
        return Ok(None);
    };
    debug!("Received {} ({} bytes)", filename, bytes.len());

    let path = tokio::task::spawn_blocking(move || {
        uploader.upload(&bytes[..], &filename, &location, &id, width)
    })
    .await??;

    Ok(Some(path))
}

/// First file part named `name`, as (filename, contents).
///
/// Parts without a filename are plain form values and are skipped. A form
/// that breaks off before the part is reached counts as having no file,
/// unless it was cut by the body limit.
async fn read_form_file(
    multipart: &mut Multipart,
    name: &str,
) -> Result<Option<(String, Bytes)>, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!("Multipart form exceeds the body limit");
                return Err(err.into());
            }
            Err(err) => {
                warn!("Failed to read multipart form: {}", err);
                return Ok(None);
            }
        };

        if field.name() != Some(name) {
            continue;
        }
        let filename = match field.file_name() {
            Some(filename) if !filename.is_empty() => filename.to_string(),
            _ => continue,
        };

        let bytes = field.bytes().await.inspect_err(|err| {
            warn!("Failed to read {} field: {}", name, err);
        })?;
        return Ok(Some((filename, bytes)));
    }
}
