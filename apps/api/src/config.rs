use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which contract analyzer backs `/api/v1/analyses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerMode {
    /// Calls Gemini with the uploaded files.
    Live,
    /// Returns the canned sample analysis; no API key needed.
    Demo,
}

impl FromStr for AnalyzerMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(AnalyzerMode::Live),
            "demo" => Ok(AnalyzerMode::Demo),
            other => bail!("ANALYZER_MODE must be 'live' or 'demo', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub analyzer_mode: AnalyzerMode,
    /// Required in live mode and for chat / index building.
    pub gemini_api_key: Option<String>,
    pub reference_data_dir: PathBuf,
    pub vector_store_path: PathBuf,
    pub rag_top_k: usize,
    /// How long a finished analysis job stays pollable before it is evicted.
    pub job_retention: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let analyzer_mode: AnalyzerMode = get("ANALYZER_MODE")
            .unwrap_or_else(|| "live".to_string())
            .parse()?;

        let gemini_api_key = get("GEMINI_API_KEY")
            .or_else(|| get("GOOGLE_API_KEY"))
            .filter(|k| !k.trim().is_empty());
        if analyzer_mode == AnalyzerMode::Live && gemini_api_key.is_none() {
            bail!("Required environment variable 'GEMINI_API_KEY' is not set (or use ANALYZER_MODE=demo)");
        }

        Ok(Config {
            analyzer_mode,
            gemini_api_key,
            reference_data_dir: get("REFERENCE_DATA_DIR")
                .unwrap_or_else(|| "./data".to_string())
                .into(),
            vector_store_path: get("VECTOR_STORE_PATH")
                .unwrap_or_else(|| "./vector_store.json".to_string())
                .into(),
            rag_top_k: get("RAG_TOP_K")
                .unwrap_or_else(|| "3".to_string())
                .parse::<usize>()
                .context("RAG_TOP_K must be a positive integer")?
                .max(1),
            job_retention: Duration::from_secs(
                get("JOB_RETENTION_SECS")
                    .unwrap_or_else(|| "1800".to_string())
                    .parse::<u64>()
                    .context("JOB_RETENTION_SECS must be a non-negative integer")?,
            ),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .context("Required environment variable 'GEMINI_API_KEY' is not set")
    }
}
