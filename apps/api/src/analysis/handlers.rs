//! Axum route handlers for the upload / analyze API.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::AnalysisReport;
use crate::errors::AppError;
use crate::extraction::{extract_pdf_text, is_pdf};
use crate::keywords::{compare_texts, InputKind};
use crate::session::{ResumeSession, SessionSummary};
use crate::state::AppState;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Resume processed and stored successfully.";
const FILE_FIELD: &str = "file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";
const DEFAULT_FILE_NAME: &str = "resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(flatten)]
    pub session: SessionSummary,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

/// JSON body whose rejections use the API error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Multipart body whose rejections use the API error envelope.
pub struct FormData(pub Multipart);

#[async_trait]
impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Multipart::from_request(req, state).await?))
    }
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload-pdf
///
/// Multipart field `file`. Extracts the PDF text and replaces the current
/// résumé session. Non-PDF uploads are rejected before extraction.
pub async fn handle_upload_pdf(
    State(state): State<AppState>,
    FormData(mut multipart): FormData,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation(format!("multipart field '{FILE_FIELD}' is required")))?;

    if !is_pdf(upload.content_type.as_deref(), &upload.bytes) {
        return Err(AppError::InvalidFileType(upload.file_name));
    }

    let extracted = extract_pdf_text(upload.bytes).await?;
    let session = ResumeSession::new(upload.file_name, &extracted);
    let summary = session.summary();

    if let Some(previous) = state.sessions.replace(session).await {
        info!("Replaced résumé session {}", previous.id);
    }
    info!(
        "Stored résumé session {} ({} page(s), {} keyword(s))",
        summary.session_id, summary.pages, summary.keywords
    );

    Ok(Json(UploadResponse {
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        session: summary,
    }))
}

/// POST /analyze
///
/// Multipart field `job_description`. Analyzes it against the current résumé.
pub async fn handle_analyze(
    State(state): State<AppState>,
    FormData(mut multipart): FormData,
) -> Result<Json<AnalysisReport>, AppError> {
    let job_description = read_text_field(&mut multipart, JOB_DESCRIPTION_FIELD)
        .await?
        .unwrap_or_default();
    if job_description.trim().is_empty() {
        return Err(AppError::EmptyInput(InputKind::JobDescription));
    }

    let session = state.sessions.current().await.ok_or(AppError::NoResume)?;
    let report = state.analyzer.analyze(&session, &job_description).await?;

    info!(
        "Analyzed session {} with {} backend: score={}",
        session.id, report.backend, report.score
    );
    Ok(Json(report))
}

/// POST /compare
///
/// Stateless keyword comparison of two texts. Does not touch the session.
pub async fn handle_compare(
    JsonBody(request): JsonBody<CompareRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let result = compare_texts(&request.resume_text, &request.job_description)?;
    Ok(Json(AnalysisReport::from_comparison(&result)))
}

/// GET /session
pub async fn handle_get_session(
    State(state): State<AppState>,
) -> Result<Json<SessionSummary>, AppError> {
    state
        .sessions
        .current()
        .await
        .map(|s| Json(s.summary()))
        .ok_or_else(|| AppError::NotFound("No résumé session".to_string()))
}

/// DELETE /session
pub async fn handle_clear_session(State(state): State<AppState>) -> StatusCode {
    if let Some(session) = state.sessions.clear().await {
        info!("Cleared résumé session {}", session.id);
    }
    StatusCode::NO_CONTENT
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

async fn read_text_field(multipart: &mut Multipart, name: &str) -> Result<Option<String>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(name) {
            return Ok(Some(field.text().await?));
        }
    }
    Ok(None)
}
