//! Text Source — turns an uploaded PDF into plain text.
//!
//! Pages are extracted concurrently on the blocking pool and joined back in page
//! order (see [`pdf::extract_pdf_text`]). Anything that is not a PDF is rejected
//! by [`is_pdf`] before extraction is attempted.

pub mod pdf;

#[cfg(test)]
#[path = "../../tests/common/fixtures.rs"]
pub(crate) mod fixtures;

use serde::Serialize;
use thiserror::Error;

pub use pdf::extract_pdf_text;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not parse PDF: {0}")]
    Parse(String),

    #[error("PDF has no pages")]
    NoPages,

    #[error("failed to extract text from page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error("PDF contains no extractable text")]
    NoText,

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Returns true if the declared content type or the leading bytes mark a PDF.
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let declared = content_type
        .map(|ct| ct.to_ascii_lowercase().contains(PDF_CONTENT_TYPE))
        .unwrap_or(false);
    declared || head.starts_with(PDF_MAGIC)
}

/// Text of a single page, tagged with its 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// The result of extracting a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    /// Pages in document order.
    pub pages: Vec<PageText>,
}

impl ExtractedText {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page texts concatenated in page order, one newline between pages.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.text.trim().is_empty())
    }
}
