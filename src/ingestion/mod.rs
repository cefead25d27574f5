//! Document ingestion pipeline
//!
//! Extraction -> chunking -> embedding -> index build -> atomic publish,
//! all scoped to one session.

pub mod chunker;
pub mod extractor;

pub use chunker::TextChunker;
pub use extractor::TextExtractor;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::index::FlatIndex;
use crate::providers::EmbeddingProvider;
use crate::session::{SessionStore, CHUNKS_FILE, CHUNK_SEPARATOR, INDEX_FILE};
use crate::types::RawDocument;

/// Outcome of one ingestion call
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub session_id: String,
    pub chunk_count: usize,
    pub index_path: PathBuf,
}

/// Orchestrates extraction, chunking, embedding, and index construction
pub struct DocumentIngestor {
    chunker: TextChunker,
    sessions: SessionStore,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl DocumentIngestor {
    pub fn new(config: &AppConfig, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        Ok(Self {
            chunker: TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap)?,
            sessions: SessionStore::from_config(&config.storage),
            embedder,
        })
    }

    /// Ingest a batch of documents into a session, replacing any prior index
    ///
    /// Documents with unsupported extensions are skipped with a warning, and
    /// a single failing document does not abort the batch; the call only
    /// fails outright when nothing usable remains.
    pub async fn ingest(
        &self,
        session_id: Option<&str>,
        documents: &[RawDocument],
    ) -> Result<IngestReport> {
        let dirs = self.sessions.resolve_or_create(session_id)?;
        let mut all_chunks: Vec<String> = Vec::new();

        for doc in documents {
            let Some(format) = doc.format() else {
                tracing::warn!(
                    session_id = %dirs.session_id,
                    filename = %doc.filename,
                    "unsupported file type skipped"
                );
                continue;
            };

            // Raw bytes land in the session temp dir under a fresh name, so
            // extraction stays stateless and failed inputs remain inspectable.
            let saved_path = match self.save_raw(&dirs.temp_dir, doc) {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(
                        session_id = %dirs.session_id,
                        filename = %doc.filename,
                        error = %e,
                        "failed to save upload, skipping document"
                    );
                    continue;
                }
            };

            tracing::info!(
                session_id = %dirs.session_id,
                original_name = %doc.filename,
                saved_as = %saved_path.display(),
                "file saved"
            );

            let text = match TextExtractor::extract(&saved_path, format) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        session_id = %dirs.session_id,
                        filename = %doc.filename,
                        error = %e,
                        "extraction failed, skipping document"
                    );
                    continue;
                }
            };

            all_chunks.extend(self.chunker.split(&text));
        }

        if all_chunks.is_empty() {
            return Err(Error::NoContentExtracted);
        }

        tracing::info!(
            session_id = %dirs.session_id,
            total_chunks = all_chunks.len(),
            "documents chunked"
        );

        let embeddings = self.embedder.embed_many(&all_chunks).await?;
        if embeddings.len() != all_chunks.len() {
            return Err(Error::embedding(format!(
                "provider returned {} embeddings for {} chunks",
                embeddings.len(),
                all_chunks.len()
            )));
        }

        let index = FlatIndex::build(embeddings)?;
        let index_path = publish_index(&dirs.index_dir, &index, &all_chunks)?;

        tracing::info!(
            session_id = %dirs.session_id,
            total_vectors = index.len(),
            dimension = index.dimension(),
            index_path = %index_path.display(),
            "index created"
        );

        Ok(IngestReport {
            session_id: dirs.session_id,
            chunk_count: all_chunks.len(),
            index_path,
        })
    }

    /// Persist raw upload bytes under a sanitized, collision-avoided name
    fn save_raw(&self, temp_dir: &Path, doc: &RawDocument) -> Result<PathBuf> {
        let stem = Path::new(&doc.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let safe: String = stem
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        let ext = Path::new(&doc.filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_lowercase();
        let suffix = Uuid::new_v4().simple().to_string();

        let path = temp_dir.join(format!("{}_{}.{}", safe, &suffix[..8], ext));
        std::fs::write(&path, &doc.data)?;
        Ok(path)
    }
}

/// Write index + chunk artifacts under temporary names, then finalize
///
/// A concurrent reader sees either the old pair or the new pair, never a
/// half-written one.
fn publish_index(index_dir: &Path, index: &FlatIndex, chunks: &[String]) -> Result<PathBuf> {
    let index_path = index_dir.join(INDEX_FILE);
    let chunks_path = index_dir.join(CHUNKS_FILE);
    let index_tmp = index_dir.join(format!("{}.tmp", INDEX_FILE));
    let chunks_tmp = index_dir.join(format!("{}.tmp", CHUNKS_FILE));

    index.persist(&index_tmp)?;
    std::fs::write(&chunks_tmp, chunks.join(CHUNK_SEPARATOR))?;

    std::fs::rename(&index_tmp, &index_path)?;
    std::fs::rename(&chunks_tmp, &chunks_path)?;

    Ok(index_path)
}
