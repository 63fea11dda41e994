//! Comparator — set algebra between a résumé keyword set and a job keyword set.
//!
//! - `matches`   = résumé ∩ job
//! - `additions` = job − résumé (what the job asks for that the résumé lacks)
//! - `deletions` = résumé − job (résumé keywords the job does not ask for)

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keywords::tokenizer::{tokenize, TokenSet};

/// Which side of a comparison an input belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Resume,
    JobDescription,
}

impl InputKind {
    /// Message shown to the user when this input is missing.
    pub fn prompt(self) -> &'static str {
        match self {
            InputKind::Resume => "Please upload your résumé first!",
            InputKind::JobDescription => "Please paste the Job Description!",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Resume => f.write_str("résumé text"),
            InputKind::JobDescription => f.write_str("job description"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("{0} is empty")]
    EmptyInput(InputKind),
}

/// The three keyword sets produced by one comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub matches: TokenSet,
    pub additions: TokenSet,
    pub deletions: TokenSet,
}

impl ComparisonResult {
    /// Share of job keywords found in the résumé, 0–100.
    pub fn score(&self) -> u32 {
        // job set = matches ∪ additions, disjoint by construction
        let job_len = self.matches.len() + self.additions.len();
        if job_len == 0 {
            return 0;
        }
        ((self.matches.len() as f64 / job_len as f64) * 100.0).round() as u32
    }
}

/// Compares two already-tokenized sets.
pub fn compare_sets(resume: &TokenSet, job: &TokenSet) -> ComparisonResult {
    let matches = resume.iter().filter(|w| job.contains(w)).collect();
    let additions = job.iter().filter(|w| !resume.contains(w)).collect();
    let deletions = resume.iter().filter(|w| !job.contains(w)).collect();

    ComparisonResult {
        matches,
        additions,
        deletions,
    }
}

/// Fails with `EmptyInput(kind)` when `text` is empty or whitespace-only.
pub fn ensure_present(text: &str, kind: InputKind) -> Result<(), CompareError> {
    if text.trim().is_empty() {
        return Err(CompareError::EmptyInput(kind));
    }
    Ok(())
}

/// Tokenizes both texts and compares them. The résumé is checked first.
pub fn compare_texts(resume_text: &str, job_text: &str) -> Result<ComparisonResult, CompareError> {
    ensure_present(resume_text, InputKind::Resume)?;
    ensure_present(job_text, InputKind::JobDescription)?;

    Ok(compare_sets(&tokenize(resume_text), &tokenize(job_text)))
}
