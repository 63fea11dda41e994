//! PDF text extraction with per-page fan-out.
//!
//! # spawn_blocking pattern
//! Parsing and text decoding are CPU-bound. The document is parsed once on the
//! blocking pool, then one blocking task per page decodes that page's text. All
//! handles are spawned before any is awaited, so pages run concurrently; they are
//! awaited in page order, which keeps the join order equal to document order.
//!
//! If every page comes back blank, the whole-document extractor from
//! `pdf-extract` gets a second try: it handles font encodings the per-page
//! decoder does not.

use std::sync::Arc;

use bytes::Bytes;
use lopdf::Document;
use tracing::{debug, info, warn};

use crate::extraction::{ExtractedText, ExtractionError, PageText};

/// Extracts the text of every page of a PDF held in memory.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<ExtractedText, ExtractionError> {
    let parse_bytes = bytes.clone();
    let document = tokio::task::spawn_blocking(move || Document::load_mem(&parse_bytes))
        .await?
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;
    let document = Arc::new(document);

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Err(ExtractionError::NoPages);
    }
    debug!("Extracting text from {} page(s)", page_numbers.len());

    let handles: Vec<_> = page_numbers
        .iter()
        .map(|&number| {
            let document = Arc::clone(&document);
            tokio::task::spawn_blocking(move || document.extract_text(&[number]))
        })
        .collect();

    let mut pages = Vec::with_capacity(handles.len());
    for (number, handle) in page_numbers.into_iter().zip(handles) {
        let text = handle.await?.map_err(|e| ExtractionError::Page {
            page: number,
            reason: e.to_string(),
        })?;
        pages.push(PageText { number, text });
    }

    let mut extracted = ExtractedText { pages };
    if extracted.is_blank() {
        warn!("Per-page extraction found no text, falling back to whole-document extraction");
        extracted = extract_whole_document(bytes, extracted.page_count()).await?;
    }

    if extracted.is_blank() {
        return Err(ExtractionError::NoText);
    }

    info!(
        "Extracted {} characters from {} page(s)",
        extracted.text().chars().count(),
        extracted.page_count()
    );
    Ok(extracted)
}

/// Runs `pdf-extract` over the whole document and splits the result on form
/// feeds, which it emits between pages.
async fn extract_whole_document(
    bytes: Bytes,
    page_count: usize,
) -> Result<ExtractedText, ExtractionError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await?
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let mut pages: Vec<PageText> = text
        .split('\u{c}')
        .enumerate()
        .map(|(i, page)| PageText {
            number: i as u32 + 1,
            text: page.to_string(),
        })
        .collect();

    // Without page breaks in the output the page texts can't be told apart.
    if pages.len() != page_count {
        pages = vec![PageText { number: 1, text }];
    }

    Ok(ExtractedText { pages })
}
