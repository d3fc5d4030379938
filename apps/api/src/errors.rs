use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cv::extractor::UnreadableDocument;
use crate::job::fetcher::FetchError;
use crate::llm_client::InferenceError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    UnreadableDocument(#[from] UnreadableDocument),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::Validation(format!("Invalid multipart upload: {}", e.body_text()))
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::UnreadableDocument(e) => {
                tracing::warn!("Unreadable document: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNREADABLE_DOCUMENT",
                    e.to_string(),
                )
            }
            AppError::Fetch(FetchError::InvalidUrl(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_URL", msg.clone())
            }
            AppError::Fetch(e) => {
                tracing::warn!("Fetch error: {e}");
                (StatusCode::BAD_GATEWAY, "FETCH_ERROR", e.to_string())
            }
            AppError::Inference(InferenceError::Throttled(msg)) => {
                tracing::warn!("Inference throttled: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "INFERENCE_THROTTLED",
                    "The AI service is busy, try again shortly".to_string(),
                )
            }
            AppError::Inference(e) => {
                tracing::error!("Inference error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "INFERENCE_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_unreadable_document_is_422() {
        assert_eq!(
            status_of(UnreadableDocument::Empty.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_invalid_url_is_400() {
        let err = FetchError::InvalidUrl("not a url".to_string());
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_fetch_status_is_502() {
        let err = FetchError::Status {
            url: "https://jobs.example.com".to_string(),
            status: 404,
        };
        assert_eq!(status_of(err.into()), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_throttled_inference_is_429() {
        let err = InferenceError::Throttled("slow down".to_string());
        assert_eq!(status_of(err.into()), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_auth_inference_is_502() {
        let err = InferenceError::Auth("expired token".to_string());
        assert_eq!(status_of(err.into()), StatusCode::BAD_GATEWAY);
    }
}
