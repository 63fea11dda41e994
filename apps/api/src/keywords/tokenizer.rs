//! Tokenizer — turns free text into a deduplicated set of lowercase keywords.
//!
//! A token is a maximal run of characters that are neither whitespace nor one of
//! `,` `.` `;` `:`. Tokens of two characters or fewer are dropped.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Tokens whose length (in chars) is at or below this are discarded.
pub const MAX_DISCARDED_CHARS: usize = 2;

/// A set of unique keywords extracted from one text.
///
/// Iteration follows first-occurrence order. Equality is set equality, so two
/// sets with the same members compare equal regardless of order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet(IndexSet<String>);

impl TokenSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Members in iteration order.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Number of tokens shared with `other`.
    pub fn overlap(&self, other: &TokenSet) -> usize {
        self.iter().filter(|t| other.contains(t)).count()
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        TokenSet(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for TokenSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        TokenSet(iter.into_iter().map(str::to_owned).collect())
    }
}

impl IntoIterator for TokenSet {
    type Item = String;
    type IntoIter = indexmap::set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Splits `text` into its keyword set. Empty input yields an empty set.
pub fn tokenize(text: &str) -> TokenSet {
    text.to_lowercase()
        .split(is_delimiter)
        .filter(|t| t.chars().count() > MAX_DISCARDED_CHARS)
        .collect()
}

// U+FEFF is not Unicode whitespace but shows up as a stray BOM in PDF text.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '\u{feff}')
}
