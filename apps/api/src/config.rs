use anyhow::{bail, Context, Result};

use crate::analysis::AnalyzerBackend;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if a value is malformed or the LLM backend lacks a key.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub analyzer_backend: AnalyzerBackend,
    pub anthropic_api_key: Option<String>,
    /// `*` means any origin.
    pub cors_allow_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            analyzer_backend: AnalyzerBackend::Keyword,
            anthropic_api_key: None,
            cors_allow_origin: "*".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?,
            None => defaults.max_upload_bytes,
        };

        let analyzer_backend = match lookup("ANALYZER_BACKEND") {
            Some(v) => v
                .parse::<AnalyzerBackend>()
                .map_err(anyhow::Error::msg)
                .context("invalid ANALYZER_BACKEND")?,
            None => defaults.analyzer_backend,
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        if analyzer_backend == AnalyzerBackend::Llm && anthropic_api_key.is_none() {
            bail!("Required environment variable 'ANTHROPIC_API_KEY' is not set (ANALYZER_BACKEND=llm)");
        }

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes,
            analyzer_backend,
            anthropic_api_key,
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").unwrap_or(defaults.cors_allow_origin),
        })
    }
}
