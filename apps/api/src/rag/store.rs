//! Local vector store for reference chunks, persisted as a single JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index not found at {0} (run `risk-highlighter build-index` first)")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt index file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("embedding dimension mismatch: index has {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    /// File name of the reference PDF the chunk came from.
    pub source: String,
    pub page_content: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredChunk {
    pub source: String,
    pub page_content: String,
    pub score: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorStore {
    chunks: Vec<StoredChunk>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.chunks.first().map(|c| c.embedding.len())
    }

    pub fn add(&mut self, chunk: StoredChunk) -> Result<(), StoreError> {
        if let Some(expected) = self.dimension() {
            if chunk.embedding.len() != expected {
                return Err(StoreError::DimensionMismatch {
                    expected,
                    actual: chunk.embedding.len(),
                });
            }
        }
        self.chunks.push(chunk);
        Ok(())
    }

    /// Top-`k` chunks by cosine similarity, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, StoreError> {
        if let Some(expected) = self.dimension() {
            if query.len() != expected {
                return Err(StoreError::DimensionMismatch {
                    expected,
                    actual: query.len(),
                });
            }
        }

        let mut scored: Vec<(f32, &StoredChunk)> = self
            .chunks
            .iter()
            .map(|c| (cosine_similarity(query, &c.embedding), c))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(score, c)| ScoredChunk {
                source: c.source.clone(),
                page_content: c.page_content.clone(),
                score,
            })
            .collect())
    }

    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec(self)?;
        tokio::fs::write(path, json).await?;
        info!("Saved {} chunks to {}", self.len(), path.display());
        Ok(())
    }

    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source: &str, text: &str, embedding: Vec<f32>) -> StoredChunk {
        StoredChunk {
            source: source.to_string(),
            page_content: text.to_string(),
            embedding,
        }
    }

    fn sample_store() -> VectorStore {
        let mut store = VectorStore::new();
        store.add(chunk("labor.pdf", "휴게", vec![1.0, 0.0, 0.0])).unwrap();
        store.add(chunk("labor.pdf", "해고", vec![0.0, 1.0, 0.0])).unwrap();
        store.add(chunk("wage.pdf", "최저임금", vec![0.7, 0.7, 0.0])).unwrap();
        store
    }

    #[test]
    fn test_cosine_identical_and_orthogonal() {
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let results = sample_store().search(&[1.0, 0.1, 0.0], 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].page_content, "휴게");
        assert_eq!(results[1].page_content, "최저임금");
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_search_k_larger_than_store() {
        assert_eq!(sample_store().search(&[0.0, 1.0, 0.0], 10).unwrap().len(), 3);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut store = sample_store();
        assert!(matches!(
            store.add(chunk("x.pdf", "x", vec![1.0])),
            Err(StoreError::DimensionMismatch { expected: 3, actual: 1 })
        ));
        assert!(store.search(&[1.0, 0.0], 1).is_err());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index").join("store.json");
        sample_store().save(&path).await.unwrap();

        let loaded = VectorStore::load(&path).await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.dimension(), Some(3));
    }

    #[tokio::test]
    async fn test_load_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        let err = VectorStore::load(&dir.path().join("missing.json")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
