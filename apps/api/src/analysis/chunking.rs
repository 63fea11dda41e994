//! Sentence chunking for LLM context.
//!
//! Text is split into sentences (a run of whitespace after `.`, `?` or `!`
//! ends a sentence), then sentences are packed into chunks of at most
//! `chunk_size` characters. When a chunk is closed, its last three sentences
//! open the next one, so neighbouring chunks overlap.

use crate::keywords::{tokenize, TokenSet};

pub const DEFAULT_CHUNK_SIZE: usize = 500;
const OVERLAP_SENTENCES: usize = 3;

/// Splits after sentence-ending punctuation followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '?' | '!')) {
            sentences.push(&text[start..i]);
            let mut end = i + c.len_utf8();
            while let Some(&(j, d)) = chars.peek() {
                if !d.is_whitespace() {
                    break;
                }
                end = j + d.len_utf8();
                chars.next();
            }
            start = end;
            prev = None;
            continue;
        }
        prev = Some(c);
    }
    sentences.push(&text[start..]);

    sentences.retain(|s| !s.trim().is_empty());
    sentences
}

pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let len = sentence.chars().count();
        if current_len + len <= chunk_size {
            current.push(sentence);
            current_len += len + 1;
            continue;
        }

        let chunk = current.join(" ").trim().to_string();
        if !chunk.is_empty() {
            chunks.push(chunk);
        }

        let keep_from = current.len().saturating_sub(OVERLAP_SENTENCES);
        current.drain(..keep_from);
        current.push(sentence);
        current_len = current.iter().map(|s| s.chars().count()).sum();
    }

    let last = current.join(" ").trim().to_string();
    if !last.is_empty() {
        chunks.push(last);
    }
    chunks
}

/// Picks the `limit` chunks sharing the most keywords with `job`.
/// Ties keep document order.
pub fn rank_chunks<'a>(chunks: &'a [String], job: &TokenSet, limit: usize) -> Vec<&'a str> {
    let mut scored: Vec<(usize, usize)> = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| (i, tokenize(chunk).overlap(job)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    scored
        .into_iter()
        .take(limit)
        .map(|(i, _)| chunks[i].as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_on_terminal_punctuation() {
        let sentences = split_sentences("Built APIs. Led a team!  Shipped it?\nDone");
        assert_eq!(sentences, vec!["Built APIs.", "Led a team!", "Shipped it?", "Done"]);
    }

    #[test]
    fn test_split_sentences_ignores_inner_dots() {
        assert_eq!(split_sentences("Used node.js and v1.2 daily."), vec!["Used node.js and v1.2 daily."]);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = chunk_text("One. Two. Three.", DEFAULT_CHUNK_SIZE);
        assert_eq!(chunks, vec!["One. Two. Three."]);
    }

    #[test]
    fn test_chunks_respect_size_and_overlap() {
        let text = "Aaaa one. Bbbb two. Cccc three. Dddd four. Eeee five.";
        let chunks = chunk_text(text, 25);

        assert!(chunks.len() > 1);
        // the sentence that overflowed the first chunk starts the next one,
        // preceded by the overlap carried from the first chunk
        assert!(chunks[0].starts_with("Aaaa one."));
        assert!(chunks[1].contains("Cccc three."));
        assert!(chunks[1].contains("Aaaa one.") || chunks[1].contains("Bbbb two."));
        assert!(chunks.last().unwrap().ends_with("Eeee five."));
    }

    #[test]
    fn test_rank_chunks_prefers_keyword_overlap() {
        let chunks = vec![
            "Managed office supplies.".to_string(),
            "Built Rust services on Kubernetes.".to_string(),
            "Wrote Rust tooling.".to_string(),
        ];
        let job = tokenize("Rust engineer, Kubernetes required");
        let ranked = rank_chunks(&chunks, &job, 2);
        assert_eq!(ranked, vec!["Built Rust services on Kubernetes.", "Wrote Rust tooling."]);
    }

    #[test]
    fn test_rank_chunks_ties_keep_document_order() {
        let chunks = vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()];
        let ranked = rank_chunks(&chunks, &tokenize("nothing shared"), 5);
        assert_eq!(ranked, vec!["alpha", "beta", "gamma"]);
    }
}
