use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt recipe document: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("No recipe ids left to allocate")]
    IdsExhausted,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Recipe not found")]
    NotFound,

    #[error("No image part")]
    MissingImagePart,

    #[error("No selected file")]
    NoFileSelected,

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Internal server error")]
    Storage(#[from] StorageError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MissingImagePart
            | AppError::NoFileSelected
            | AppError::MissingField(_)
            | AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage(ref e) => {
                error!("Storage failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = render(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Recipe not found" }));
    }

    #[tokio::test]
    async fn test_image_errors_are_bad_requests() {
        let (status, body) = render(AppError::MissingImagePart).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image part");

        let (status, body) = render(AppError::NoFileSelected).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");
    }

    #[tokio::test]
    async fn test_payload_too_large() {
        let (status, body) = render(AppError::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "Payload too large");
    }

    #[tokio::test]
    async fn test_exhausted_ids_are_internal() {
        let (status, body) = render(AppError::Storage(StorageError::IdsExhausted)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_storage_cause_is_hidden() {
        let cause = io::Error::new(io::ErrorKind::PermissionDenied, "/secret/path");
        let (status, body) = render(AppError::Storage(cause.into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }
}
