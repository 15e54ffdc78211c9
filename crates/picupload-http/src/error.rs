use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use picupload_core::UploadError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UploadErrorType {
    InvalidId,
    InvalidForm,
    PayloadTooLarge,
    FileNotSupported,
    DecodeError,
    ResizeError,
    SinkCreateError,
    EncodeError,
    Internal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub error_type: UploadErrorType,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Image id is empty after sanitizing")]
    InvalidId,

    /// The picture field was present but its contents could not be read.
    #[error("Failed to read uploaded file: {}", .0.body_text())]
    Form(#[from] MultipartError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The blocking upload task panicked or was cancelled.
    #[error("Upload worker failed: {0}")]
    Worker(#[from] JoinError),
}

impl ApiError {
    pub fn error_type(&self) -> UploadErrorType {
        match self {
            ApiError::InvalidId => UploadErrorType::InvalidId,
            ApiError::Form(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                UploadErrorType::PayloadTooLarge
            }
            ApiError::Form(_) => UploadErrorType::InvalidForm,
            ApiError::Upload(err) => match err {
                UploadError::FileNotSupported => UploadErrorType::FileNotSupported,
                UploadError::Decode(_) => UploadErrorType::DecodeError,
                UploadError::Resize(_) => UploadErrorType::ResizeError,
                UploadError::SinkCreate { .. } => UploadErrorType::SinkCreateError,
                UploadError::Encode(_) => UploadErrorType::EncodeError,
                UploadError::MissingDecoder(_) => UploadErrorType::Internal,
            },
            ApiError::Worker(_) => UploadErrorType::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.error_type() {
            UploadErrorType::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            UploadErrorType::InvalidId
            | UploadErrorType::InvalidForm
            | UploadErrorType::FileNotSupported
            | UploadErrorType::DecodeError
            | UploadErrorType::ResizeError => StatusCode::BAD_REQUEST,
            UploadErrorType::SinkCreateError
            | UploadErrorType::EncodeError
            | UploadErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            detail: self.to_string(),
            error_type: self.error_type(),
        };
        (self.status(), Json(payload)).into_response()
    }
}
