//! Résumé session — the extracted résumé text and its keyword set.
//!
//! At most one session is live per `SessionSlot`. A new upload replaces the
//! previous session wholesale; nothing is merged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::extraction::ExtractedText;
use crate::keywords::{tokenize, TokenSet};

#[derive(Debug, Clone)]
pub struct ResumeSession {
    pub id: Uuid,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub page_count: usize,
    pub text: String,
    pub tokens: TokenSet,
}

impl ResumeSession {
    pub fn new(file_name: impl Into<String>, extracted: &ExtractedText) -> Self {
        Self::from_text(file_name, extracted.text(), extracted.page_count())
    }

    pub fn from_text(file_name: impl Into<String>, text: String, page_count: usize) -> Self {
        let tokens = tokenize(&text);
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            uploaded_at: Utc::now(),
            page_count,
            text,
            tokens,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            file_name: self.file_name.clone(),
            uploaded_at: self.uploaded_at,
            pages: self.page_count,
            characters: self.text.chars().count(),
            keywords: self.tokens.len(),
        }
    }
}

/// Public view of a session (never includes the résumé text itself).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub pages: usize,
    pub characters: usize,
    pub keywords: usize,
}

/// Shared holder for the current résumé session.
#[derive(Clone, Default)]
pub struct SessionSlot {
    inner: Arc<RwLock<Option<ResumeSession>>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `session`, returning the one it replaced.
    pub async fn replace(&self, session: ResumeSession) -> Option<ResumeSession> {
        self.inner.write().await.replace(session)
    }

    pub async fn current(&self) -> Option<ResumeSession> {
        self.inner.read().await.clone()
    }

    pub async fn clear(&self) -> Option<ResumeSession> {
        self.inner.write().await.take()
    }
}
