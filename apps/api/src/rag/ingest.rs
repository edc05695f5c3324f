//! Builds the reference index from a directory of labor-law PDFs.
//!
//! Flow: list `*.pdf` → extract text (spawn_blocking) → split → embed → persist.
//! Unreadable PDFs are skipped with a warning; an empty directory is an error.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::rag::splitter::{split_text, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::rag::store::{StoredChunk, VectorStore};
use crate::rag::Embedder;

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub files: usize,
    pub skipped: usize,
    pub chunks: usize,
}

/// A reference document after text extraction.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub source: String,
    pub text: String,
}

pub async fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Reference data directory '{}' is not readable", dir.display()))?;

    let mut pdfs = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

async fn extract_pdf(path: PathBuf) -> Result<String> {
    let display = path.display().to_string();
    tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .with_context(|| format!("PDF reader crashed on {display}"))?
        .map_err(|e| anyhow!("Failed to extract text from {display}: {e}"))
}

/// Splits and embeds already-extracted documents into a fresh store.
pub async fn index_documents(
    documents: &[SourceDocument],
    embedder: &dyn Embedder,
) -> Result<VectorStore> {
    let mut store = VectorStore::new();
    for doc in documents {
        let chunks = split_text(&doc.text, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP);
        info!("{}: {} chunk(s)", doc.source, chunks.len());
        for page_content in chunks {
            let embedding = embedder
                .embed(&page_content)
                .await
                .with_context(|| format!("Embedding failed for a chunk of {}", doc.source))?;
            store.add(StoredChunk {
                source: doc.source.clone(),
                page_content,
                embedding,
            })?;
        }
    }
    Ok(store)
}

/// Rebuilds the index at `index_path` from every PDF in `data_dir`.
pub async fn build_index(
    data_dir: &Path,
    index_path: &Path,
    embedder: &dyn Embedder,
) -> Result<IndexStats> {
    let pdfs = list_pdfs(data_dir).await?;
    if pdfs.is_empty() {
        bail!("No PDF files found in {}", data_dir.display());
    }
    info!("Found {} PDF file(s) in {}", pdfs.len(), data_dir.display());

    let mut documents = Vec::with_capacity(pdfs.len());
    let mut skipped = 0;
    for path in pdfs {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match extract_pdf(path).await {
            Ok(text) => documents.push(SourceDocument { source, text }),
            Err(e) => {
                warn!("Skipping {source}: {e:#}");
                skipped += 1;
            }
        }
    }

    if documents.is_empty() {
        bail!("None of the PDF files in {} could be read", data_dir.display());
    }

    let store = index_documents(&documents, embedder).await?;
    store.save(index_path).await?;

    let stats = IndexStats {
        files: documents.len(),
        skipped,
        chunks: store.len(),
    };
    info!(
        "Reference index built: files={} skipped={} chunks={}",
        stats.files, stats.skipped, stats.chunks
    );
    Ok(stats)
}
