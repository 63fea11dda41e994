//! Analysis — turns a résumé session plus a job description into an
//! `AnalysisReport`, the payload of `POST /analyze`.
//!
//! Backends are pluggable behind the `Analyzer` trait. `AppState` carries an
//! `Arc<dyn Analyzer>` chosen at startup from `ANALYZER_BACKEND`:
//! - `KeywordAnalyzer` (default): tokenizer + comparator, deterministic.
//! - `LlmAnalyzer`: ranks résumé chunks against the job and asks the LLM.

pub mod chunking;
pub mod handlers;
pub mod llm;
pub mod prompts;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::keywords::comparator::ensure_present;
use crate::keywords::{compare_sets, tokenize, ComparisonResult, InputKind};
use crate::session::ResumeSession;

pub use llm::LlmAnalyzer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerBackend {
    #[default]
    Keyword,
    Llm,
}

impl fmt::Display for AnalyzerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerBackend::Keyword => f.write_str("keyword"),
            AnalyzerBackend::Llm => f.write_str("llm"),
        }
    }
}

impl FromStr for AnalyzerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(AnalyzerBackend::Keyword),
            "llm" => Ok(AnalyzerBackend::Llm),
            other => Err(format!("unknown analyzer backend '{other}' (expected keyword or llm)")),
        }
    }
}

/// Result of one analysis. This is the wire contract of `POST /analyze`.
///
/// `missing` holds job keywords absent from the résumé; decoders also accept the
/// older `additions` name. `deletions` is only filled by the keyword backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub matches: Vec<String>,
    #[serde(default, alias = "additions")]
    pub missing: Vec<String>,
    #[serde(default)]
    pub deletions: Vec<String>,
    #[serde(default)]
    pub backend: AnalyzerBackend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<String>,
}

impl AnalysisReport {
    pub fn from_comparison(result: &ComparisonResult) -> Self {
        Self {
            score: result.score(),
            matches: result.matches.to_vec(),
            missing: result.additions.to_vec(),
            deletions: result.deletions.to_vec(),
            backend: AnalyzerBackend::Keyword,
            raw_analysis: None,
        }
    }
}

#[async_trait]
pub trait Analyzer: Send + Sync {
    fn backend(&self) -> AnalyzerBackend;

    async fn analyze(
        &self,
        session: &ResumeSession,
        job_description: &str,
    ) -> Result<AnalysisReport, AppError>;
}

/// Set comparison of résumé keywords against job keywords.
pub struct KeywordAnalyzer;

#[async_trait]
impl Analyzer for KeywordAnalyzer {
    fn backend(&self) -> AnalyzerBackend {
        AnalyzerBackend::Keyword
    }

    async fn analyze(
        &self,
        session: &ResumeSession,
        job_description: &str,
    ) -> Result<AnalysisReport, AppError> {
        ensure_present(&session.text, InputKind::Resume)?;
        ensure_present(job_description, InputKind::JobDescription)?;

        let result = compare_sets(&session.tokens, &tokenize(job_description));
        Ok(AnalysisReport::from_comparison(&result))
    }
}
