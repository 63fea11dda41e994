//! LLM-backed analyzer.
//!
//! The résumé is chunked by sentence, the chunks sharing the most keywords with
//! the job description are sent to the model together with the job text, and
//! the reply is parsed from its `SCORE:` / `MATCHES:` / `MISSING:` lines.

use async_trait::async_trait;
use tracing::debug;

use crate::analysis::chunking::{chunk_text, rank_chunks, DEFAULT_CHUNK_SIZE};
use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::analysis::{AnalysisReport, Analyzer, AnalyzerBackend};
use crate::errors::AppError;
use crate::keywords::comparator::ensure_present;
use crate::keywords::{tokenize, InputKind};
use crate::llm_client::LlmClient;
use crate::session::ResumeSession;

const CONTEXT_CHUNKS: usize = 5;

pub struct LlmAnalyzer(pub LlmClient);

#[async_trait]
impl Analyzer for LlmAnalyzer {
    fn backend(&self) -> AnalyzerBackend {
        AnalyzerBackend::Llm
    }

    async fn analyze(
        &self,
        session: &ResumeSession,
        job_description: &str,
    ) -> Result<AnalysisReport, AppError> {
        ensure_present(&session.text, InputKind::Resume)?;
        ensure_present(job_description, InputKind::JobDescription)?;

        let prompt = build_prompt(&session.text, job_description);
        let reply = self
            .0
            .call_text(&prompt, ANALYSIS_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("analysis failed: {e}")))?;

        Ok(parse_reply(&reply))
    }
}

fn build_prompt(resume_text: &str, job_description: &str) -> String {
    let chunks = chunk_text(resume_text, DEFAULT_CHUNK_SIZE);
    let job_tokens = tokenize(job_description);
    let context = rank_chunks(&chunks, &job_tokens, CONTEXT_CHUNKS);
    debug!(
        "Sending {} of {} résumé chunk(s) to the LLM",
        context.len(),
        chunks.len()
    );

    let resume_chunks = context
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n");

    ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_description}", job_description.trim())
        .replace("{resume_chunks}", &resume_chunks)
}

/// Reads the structured lines out of a model reply. Absent lines give a zero
/// score or empty lists; the full reply is kept as `raw_analysis`.
pub fn parse_reply(reply: &str) -> AnalysisReport {
    let score = find_field(reply, "SCORE:")
        .and_then(|v| {
            let digits: String = v.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        })
        .map(|s| s.min(100))
        .unwrap_or(0);

    AnalysisReport {
        score,
        matches: find_field(reply, "MATCHES:").map(split_list).unwrap_or_default(),
        missing: find_field(reply, "MISSING:").map(split_list).unwrap_or_default(),
        deletions: Vec::new(),
        backend: AnalyzerBackend::Llm,
        raw_analysis: Some(reply.to_string()),
    }
}

/// Rest of the first line containing `label`, after the label.
fn find_field<'a>(reply: &'a str, label: &str) -> Option<&'a str> {
    reply.lines().find_map(|line| {
        line.find(label)
            .map(|pos| line[pos + label.len()..].trim())
    })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .trim_matches('*')
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
        let reply = "SCORE: 72\nMATCHES: Python, AWS, REST APIs\nMISSING: Docker, Kubernetes";
        let report = parse_reply(reply);
        assert_eq!(report.score, 72);
        assert_eq!(report.matches, vec!["Python", "AWS", "REST APIs"]);
        assert_eq!(report.missing, vec!["Docker", "Kubernetes"]);
        assert!(report.deletions.is_empty());
        assert_eq!(report.backend, AnalyzerBackend::Llm);
        assert_eq!(report.raw_analysis.as_deref(), Some(reply));
    }

    #[test]
    fn test_parse_reply_with_markdown_and_brackets() {
        let reply = "Here you go:\n**SCORE: 85**\n**MATCHES: [Rust, Tokio]**\nMISSING: []";
        let report = parse_reply(reply);
        assert_eq!(report.score, 85);
        assert_eq!(report.matches, vec!["Rust", "Tokio"]);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_parse_reply_without_fields_defaults() {
        let report = parse_reply("I cannot evaluate this candidate.");
        assert_eq!(report.score, 0);
        assert!(report.matches.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_parse_reply_clamps_score() {
        assert_eq!(parse_reply("SCORE: 250").score, 100);
    }

    #[test]
    fn test_prompt_contains_job_and_relevant_chunks() {
        let resume = "Organized the office party. Built Rust services on Kubernetes. Wrote docs.";
        let prompt = build_prompt(resume, "  Rust engineer with Kubernetes  ");
        assert!(prompt.contains("Job Description:\nRust engineer with Kubernetes\n"));
        assert!(prompt.contains("Built Rust services on Kubernetes."));
        assert!(prompt.contains("MISSING: [comma-separated list of missing skills]"));
    }
}
