// Keyword layer: tokenization of free text and set comparison between a résumé
// and a job description. Pure, synchronous, no I/O.

pub mod comparator;
pub mod tokenizer;

pub use comparator::{compare_sets, compare_texts, CompareError, ComparisonResult, InputKind};
pub use tokenizer::{tokenize, TokenSet};
