//! Labor-law chat backed by the reference index.
//!
//! Retrieval problems never fail the request: without an index (or when the
//! question cannot be embedded) the model answers from the question alone.
//! A failed generation call is reported in-band with `status = error`.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::llm_client::{GenerateRequest, LlmClient, Part, CHAT_MODEL};
use crate::rag::prompts::{chat_system_prompt, chat_user_prompt};
use crate::rag::store::VectorStore;
use crate::rag::Embedder;

fn default_use_rag() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub contract_text: String,
    #[serde(default = "default_use_rag")]
    pub use_rag: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<String>,
    pub status: ChatStatus,
}

/// Top-`k` chunk texts for the question, or nothing if retrieval is unavailable.
pub async fn retrieve_sources(
    question: &str,
    index: Option<&VectorStore>,
    embedder: &dyn Embedder,
    k: usize,
) -> Vec<String> {
    let Some(index) = index.filter(|i| !i.is_empty()) else {
        return Vec::new();
    };

    let query = match embedder.embed(question).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Question embedding failed, answering without references: {e}");
            return Vec::new();
        }
    };

    match index.search(&query, k) {
        Ok(hits) => hits.into_iter().map(|h| h.page_content).collect(),
        Err(e) => {
            warn!("Reference search failed: {e}");
            Vec::new()
        }
    }
}

pub async fn chat_with_contract(
    llm: &LlmClient,
    index: Option<&VectorStore>,
    top_k: usize,
    request: &ChatRequest,
) -> ChatResponse {
    let sources = if request.use_rag {
        retrieve_sources(&request.question, index, llm, top_k).await
    } else {
        Vec::new()
    };

    let system = chat_system_prompt();
    let generate = GenerateRequest {
        model: CHAT_MODEL,
        system: Some(&system),
        parts: vec![Part::text(chat_user_prompt(
            &request.question,
            &request.contract_text,
            &sources,
        ))],
        temperature: 0.3,
        json_output: false,
    };

    match llm.generate_text(&generate).await {
        Ok(answer) => ChatResponse {
            answer,
            sources,
            status: ChatStatus::Success,
        },
        Err(e) => {
            error!("Chat failed: {e}");
            ChatResponse {
                answer: format!("죄송합니다. 답변 생성 중 오류가 발생했습니다: {e}"),
                sources: Vec::new(),
                status: ChatStatus::Error,
            }
        }
    }
}
