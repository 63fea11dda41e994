//! HTTP client for a running Lens API (the remote flow).
//!
//! One request per call: no retry, no timeout, no cancellation. A non-2xx reply
//! becomes `ClientError::Status` carrying the server's message.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::analysis::handlers::UploadResponse;
use crate::analysis::AnalysisReport;
use crate::extraction::PDF_CONTENT_TYPE;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
}

#[derive(Clone)]
pub struct LensClient {
    http: Client,
    base_url: String,
}

impl LensClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /upload-pdf
    pub async fn upload_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ClientError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_CONTENT_TYPE)?;
        let form = Form::new().part("file", part);

        debug!("Uploading {file_name} to {}", self.base_url);
        let response = self
            .http
            .post(self.url("/upload-pdf"))
            .multipart(form)
            .send()
            .await?;
        decode(response, "PDF processing failed.").await
    }

    /// POST /analyze
    pub async fn analyze(&self, job_description: &str) -> Result<AnalysisReport, ClientError> {
        let form = Form::new().text("job_description", job_description.to_string());

        let response = self
            .http
            .post(self.url("/analyze"))
            .multipart(form)
            .send()
            .await?;
        decode(response, "Analysis failed.").await
    }

    /// POST /compare
    pub async fn compare(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisReport, ClientError> {
        let response = self
            .http
            .post(self.url("/compare"))
            .json(&json!({
                "resume_text": resume_text,
                "job_description": job_description,
            }))
            .send()
            .await?;
        decode(response, "Comparison failed.").await
    }

    /// DELETE /session
    pub async fn clear_session(&self) -> Result<(), ClientError> {
        let response = self.http.delete(self.url("/session")).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| "Could not clear session.".to_string()),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
        });
    }
    Ok(response.json::<T>().await?)
}

/// Pulls a human-readable message out of an error body: `detail`, then
/// `error.message`, then `error` when it is a plain string.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(Value::as_str)
        .or_else(|| value.pointer("/error/message").and_then(Value::as_str))
        .or_else(|| value.get("error").and_then(Value::as_str))
        .map(str::to_string)
}
