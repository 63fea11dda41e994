use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::keywords::{CompareError, InputKind};

pub const NO_RESUME_MESSAGE: &str = "No resume has been uploaded yet. Please upload a PDF first.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not a PDF file: {0}")]
    InvalidFileType(String),

    #[error("Empty input: {0}")]
    EmptyInput(InputKind),

    #[error("No résumé uploaded")]
    NoResume,

    #[error("Upload exceeds the size limit")]
    PayloadTooLarge,

    #[error("Extraction error: {0}")]
    Extraction(ExtractionError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CompareError> for AppError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::EmptyInput(kind) => AppError::EmptyInput(kind),
        }
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            // a panicked or cancelled extraction task says nothing about the PDF
            ExtractionError::Task(e) => {
                AppError::Internal(anyhow::Error::new(e).context("PDF extraction task failed"))
            }
            other => AppError::Extraction(other),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(err.body_text())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(rejection.body_text())
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidFileType(name) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "INVALID_FILE_TYPE",
                format!("'{name}' is not a PDF. Please upload a valid PDF file."),
            ),
            AppError::EmptyInput(kind) => {
                (StatusCode::BAD_REQUEST, "EMPTY_INPUT", kind.prompt().to_string())
            }
            AppError::NoResume => (
                StatusCode::BAD_REQUEST,
                "NO_RESUME",
                NO_RESUME_MESSAGE.to_string(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "The uploaded file is too large".to_string(),
            ),
            AppError::Extraction(e) => {
                tracing::warn!("PDF extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    format!("Could not read text from the PDF: {e}"),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
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
            },
            "detail": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_empty_job_maps_to_bad_request_with_prompt() {
        let (status, body) = render(AppError::EmptyInput(InputKind::JobDescription)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EMPTY_INPUT");
        assert_eq!(body["detail"], "Please paste the Job Description!");
    }

    #[tokio::test]
    async fn test_invalid_file_type_is_415() {
        let (status, body) = render(AppError::InvalidFileType("notes.txt".into())).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "INVALID_FILE_TYPE");
        assert!(body["detail"].as_str().unwrap().contains("notes.txt"));
    }

    #[tokio::test]
    async fn test_no_resume_message() {
        let (status, body) = render(AppError::NoResume).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], NO_RESUME_MESSAGE);
        assert_eq!(body["error"]["message"], NO_RESUME_MESSAGE);
    }

    #[tokio::test]
    async fn test_extraction_failure_is_unprocessable() {
        let (status, body) = render(AppError::Extraction(ExtractionError::NoText)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = render(AppError::Internal(anyhow::anyhow!("secret"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["detail"].as_str().unwrap().contains("secret"));
    }

    #[tokio::test]
    async fn test_failed_extraction_task_is_internal() {
        let join_error = tokio::spawn(async { panic!("page worker crashed") })
            .await
            .unwrap_err();
        let err: AppError = ExtractionError::Task(join_error).into();
        assert!(matches!(err, AppError::Internal(_)));

        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }

    #[test]
    fn test_unreadable_pdf_stays_extraction_error() {
        let err: AppError = ExtractionError::NoText.into();
        assert!(matches!(err, AppError::Extraction(ExtractionError::NoText)));
    }

    #[test]
    fn test_compare_error_converts() {
        let err: AppError = CompareError::EmptyInput(InputKind::Resume).into();
        assert!(matches!(err, AppError::EmptyInput(InputKind::Resume)));
    }
}
