//! Workbench — the interactive context a front end drives.
//!
//! It owns the résumé session and a single-flight trigger (the "Analyze"
//! button). Each operation holds the trigger for its whole duration; a second
//! operation started meanwhile fails with `Busy`. The trigger is released by a
//! drop guard, so every exit path, including errors, re-enables it.
//!
//! Two flows:
//! - local: extraction and comparison in-process (`load_resume`, `compare_local`)
//! - remote: a Lens API does both (`upload_remote`, `analyze_remote`)

use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::handlers::UploadResponse;
use crate::analysis::AnalysisReport;
use crate::client::{ClientError, LensClient};
use crate::extraction::{extract_pdf_text, is_pdf, ExtractionError};
use crate::keywords::comparator::ensure_present;
use crate::keywords::{compare_sets, tokenize, CompareError, ComparisonResult, InputKind};
use crate::render::{render_comparison, render_report, RenderedAnalysis};
use crate::session::{ResumeSession, SessionSlot, SessionSummary};

#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error("Please upload a valid PDF file.")]
    InvalidFileType,

    #[error("{}", .0.prompt())]
    EmptyInput(InputKind),

    #[error("Could not read the PDF: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Error: {0}")]
    Network(#[from] ClientError),

    #[error("Another request is already in progress.")]
    Busy,

    #[error("No Lens API configured for the remote flow.")]
    NoRemote,
}

impl From<CompareError> for WorkbenchError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::EmptyInput(kind) => WorkbenchError::EmptyInput(kind),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trigger (single-flight guard)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerState {
    #[default]
    Idle,
    ProcessingPdf,
    Analyzing,
}

impl TriggerState {
    /// Button text for this state.
    pub fn label(self) -> &'static str {
        match self {
            TriggerState::Idle => "Analyze",
            TriggerState::ProcessingPdf => "Processing PDF...",
            TriggerState::Analyzing => "Analyzing...",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Trigger {
    state: Arc<Mutex<TriggerState>>,
}

impl Trigger {
    fn lock(&self) -> MutexGuard<'_, TriggerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> TriggerState {
        *self.lock()
    }

    pub fn is_enabled(&self) -> bool {
        self.state() == TriggerState::Idle
    }

    /// Disables the trigger until the returned guard is dropped.
    pub fn try_acquire(&self, busy_as: TriggerState) -> Result<TriggerGuard, WorkbenchError> {
        let mut state = self.lock();
        if *state != TriggerState::Idle {
            return Err(WorkbenchError::Busy);
        }
        *state = busy_as;
        Ok(TriggerGuard {
            trigger: self.clone(),
        })
    }
}

#[derive(Debug)]
pub struct TriggerGuard {
    trigger: Trigger,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        *self.trigger.lock() = TriggerState::Idle;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Workbench
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LocalComparison {
    pub result: ComparisonResult,
    pub rendered: RenderedAnalysis,
}

#[derive(Debug, Clone)]
pub struct RemoteAnalysis {
    pub report: AnalysisReport,
    pub rendered: RenderedAnalysis,
}

#[derive(Clone, Default)]
pub struct Workbench {
    session: SessionSlot,
    trigger: Trigger,
    remote: Option<LensClient>,
}

impl Workbench {
    pub fn local() -> Self {
        Self::default()
    }

    pub fn remote(client: LensClient) -> Self {
        Self {
            remote: Some(client),
            ..Self::default()
        }
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn session(&self) -> &SessionSlot {
        &self.session
    }

    /// Extracts a résumé PDF locally and makes it the current session.
    pub async fn load_resume(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<SessionSummary, WorkbenchError> {
        if !is_pdf(content_type, &bytes) {
            return Err(WorkbenchError::InvalidFileType);
        }
        let _guard = self.trigger.try_acquire(TriggerState::ProcessingPdf)?;

        let extracted = extract_pdf_text(bytes).await?;
        let session = ResumeSession::new(file_name, &extracted);
        let summary = session.summary();
        self.session.replace(session).await;

        info!("Loaded {file_name}: {} keyword(s)", summary.keywords);
        Ok(summary)
    }

    /// Compares the current résumé against `job_text` in-process.
    pub async fn compare_local(&self, job_text: &str) -> Result<LocalComparison, WorkbenchError> {
        let session = self.session.current().await;
        let resume_text = session.as_ref().map(|s| s.text.as_str()).unwrap_or("");
        ensure_present(resume_text, InputKind::Resume)?;
        ensure_present(job_text, InputKind::JobDescription)?;

        let _guard = self.trigger.try_acquire(TriggerState::Analyzing)?;
        let resume_tokens = session.map(|s| s.tokens).unwrap_or_default();
        let result = compare_sets(&resume_tokens, &tokenize(job_text));
        debug!(
            "Local comparison: {} match(es), {} missing, {} extra",
            result.matches.len(),
            result.additions.len(),
            result.deletions.len()
        );

        Ok(LocalComparison {
            rendered: render_comparison(&result),
            result,
        })
    }

    /// Sends a résumé PDF to the remote service.
    pub async fn upload_remote(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<UploadResponse, WorkbenchError> {
        if !is_pdf(content_type, &bytes) {
            return Err(WorkbenchError::InvalidFileType);
        }
        let client = self.remote.as_ref().ok_or(WorkbenchError::NoRemote)?;
        let _guard = self.trigger.try_acquire(TriggerState::ProcessingPdf)?;

        Ok(client.upload_pdf(file_name, bytes.to_vec()).await?)
    }

    /// Asks the remote service to analyze `job_text` against its résumé.
    pub async fn analyze_remote(&self, job_text: &str) -> Result<RemoteAnalysis, WorkbenchError> {
        ensure_present(job_text, InputKind::JobDescription)?;
        let client = self.remote.as_ref().ok_or(WorkbenchError::NoRemote)?;
        let _guard = self.trigger.try_acquire(TriggerState::Analyzing)?;

        let report = client.analyze(job_text).await?;
        Ok(RemoteAnalysis {
            rendered: render_report(&report),
            report,
        })
    }
}
