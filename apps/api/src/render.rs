//! Renderer — maps keyword lists to a toolkit-agnostic display model.
//!
//! Front ends (the CLI, a web page) turn a `TagList` into whatever widgets they
//! use. An empty list renders as the "None found." placeholder.

use std::fmt;

use serde::Serialize;

use crate::analysis::AnalysisReport;
use crate::keywords::ComparisonResult;

pub const EMPTY_PLACEHOLDER: &str = "None found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Match,
    Missing,
    Deletion,
}

impl TagKind {
    pub fn heading(self) -> &'static str {
        match self {
            TagKind::Match => "Matches",
            TagKind::Missing => "Missing from résumé",
            TagKind::Deletion => "Not required by the job",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub text: String,
    pub kind: TagKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagList {
    pub kind: TagKind,
    pub tags: Vec<Tag>,
}

impl TagList {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The placeholder to show instead of tags, if there are none.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_PLACEHOLDER)
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(placeholder) = self.placeholder() {
            return f.write_str(placeholder);
        }
        let rendered: Vec<String> = self.tags.iter().map(|t| format!("[{}]", t.text)).collect();
        f.write_str(&rendered.join(" "))
    }
}

/// Builds a tag list, skipping blank entries.
pub fn render_tags<I, S>(words: I, kind: TagKind) -> TagList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tags = words
        .into_iter()
        .filter_map(|w| {
            let text = w.as_ref().trim();
            (!text.is_empty()).then(|| Tag {
                text: text.to_string(),
                kind,
            })
        })
        .collect();
    TagList { kind, tags }
}

/// All three lists for one analysis, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedAnalysis {
    pub score: u32,
    pub matches: TagList,
    pub missing: TagList,
    pub deletions: TagList,
}

impl RenderedAnalysis {
    pub fn sections(&self) -> [&TagList; 3] {
        [&self.matches, &self.missing, &self.deletions]
    }
}

pub fn render_report(report: &AnalysisReport) -> RenderedAnalysis {
    RenderedAnalysis {
        score: report.score,
        matches: render_tags(&report.matches, TagKind::Match),
        missing: render_tags(&report.missing, TagKind::Missing),
        deletions: render_tags(&report.deletions, TagKind::Deletion),
    }
}

pub fn render_comparison(result: &ComparisonResult) -> RenderedAnalysis {
    RenderedAnalysis {
        score: result.score(),
        matches: render_tags(result.matches.iter(), TagKind::Match),
        missing: render_tags(result.additions.iter(), TagKind::Missing),
        deletions: render_tags(result.deletions.iter(), TagKind::Deletion),
    }
}
