// Reference retrieval: split labor-law PDFs, embed, store locally, retrieve top-k
// chunks for the chat prompt. Embeddings go through llm_client like every other call.

pub mod chat;
pub mod handlers;
pub mod ingest;
pub mod prompts;
pub mod splitter;
pub mod store;

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};

/// Anything that can turn text into a dense vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

#[async_trait]
impl Embedder for LlmClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        LlmClient::embed(self, text).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const KEYWORDS: [&str; 4] = ["휴게", "해고", "임금", "퇴직금"];

    /// Deterministic embedder: one dimension per keyword, plus a bias term.
    pub(crate) struct KeywordEmbedder;

    #[async_trait]
    impl Embedder for KeywordEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
            let mut v: Vec<f32> = KEYWORDS
                .iter()
                .map(|k| text.matches(k).count() as f32)
                .collect();
            v.push(0.1);
            Ok(v)
        }
    }

    #[tokio::test]
    async fn test_keyword_embedder_dimensions() {
        let v = KeywordEmbedder.embed("휴게시간과 휴게").await.unwrap();
        assert_eq!(v, vec![2.0, 0.0, 0.0, 0.0, 0.1]);
    }
}
