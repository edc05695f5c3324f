mod analysis;
mod config;
mod errors;
mod highlight;
mod llm_client;
mod rag;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::analyzer::{ContractAnalyzer, DemoAnalyzer, GeminiAnalyzer};
use crate::analysis::jobs::{spawn_job_cleanup_task, JobRegistry};
use crate::config::{AnalyzerMode, Config};
use crate::llm_client::LlmClient;
use crate::rag::store::{StoreError, VectorStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if std::env::args().nth(1).as_deref() == Some("build-index") {
        return build_reference_index(&config).await;
    }

    info!("Starting Risk Highlighter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (optional in demo mode)
    let llm = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::ANALYSIS_MODEL);
            Some(client)
        }
        None => {
            warn!("GEMINI_API_KEY not set; chat is disabled");
            None
        }
    };

    // Pick the analyzer backend
    let analyzer: Arc<dyn ContractAnalyzer> = match (config.analyzer_mode, &llm) {
        (AnalyzerMode::Live, Some(client)) => Arc::new(GeminiAnalyzer::new(client.clone())),
        (AnalyzerMode::Live, None) => anyhow::bail!("Live analyzer requires GEMINI_API_KEY"),
        (AnalyzerMode::Demo, _) => Arc::new(DemoAnalyzer),
    };
    info!("Analyzer backend: {}", analyzer.backend());

    // Load the reference index if one has been built
    let reference_index = match VectorStore::load(&config.vector_store_path).await {
        Ok(store) => {
            info!(
                "Reference index loaded: {} chunks from {}",
                store.len(),
                config.vector_store_path.display()
            );
            Some(Arc::new(store))
        }
        Err(StoreError::NotFound(path)) => {
            warn!("No reference index at {path}; chat answers without references");
            None
        }
        Err(e) => {
            warn!("Reference index unusable, chat answers without references: {e}");
            None
        }
    };

    // Evict finished jobs nobody discarded
    let jobs = JobRegistry::new();
    let _cleanup = spawn_job_cleanup_task(jobs.clone(), config.job_retention, None);

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm,
        analyzer,
        jobs,
        reference_index,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `risk-highlighter build-index`: embeds the reference PDFs and writes the index file.
async fn build_reference_index(config: &Config) -> Result<()> {
    let llm = LlmClient::new(config.require_api_key()?.to_string())?;
    info!(
        "Building reference index from {} (model: {})",
        config.reference_data_dir.display(),
        llm_client::EMBEDDING_MODEL
    );

    let stats = rag::ingest::build_index(
        &config.reference_data_dir,
        &config.vector_store_path,
        &llm,
    )
    .await?;

    info!(
        "Indexed {} file(s) into {} chunks ({} skipped) at {}",
        stats.files,
        stats.chunks,
        stats.skipped,
        config.vector_store_path.display()
    );
    Ok(())
}
