use std::sync::Arc;

use crate::analysis::analyzer::ContractAnalyzer;
use crate::analysis::jobs::JobRegistry;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::rag::store::VectorStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Absent when no API key is configured (demo mode); chat is then unavailable.
    pub llm: Option<LlmClient>,
    /// Pluggable analyzer. Gemini in live mode, canned fixture in demo mode.
    pub analyzer: Arc<dyn ContractAnalyzer>,
    pub jobs: JobRegistry,
    /// Reference index loaded at startup, if one has been built.
    pub reference_index: Option<Arc<VectorStore>>,
}
