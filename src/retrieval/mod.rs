//! Retrieval and answer pipeline
//!
//! Loads a session's persisted index, retrieves the nearest chunks for a
//! question, and asks the generation provider for a grounded answer.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::index::FlatIndex;
use crate::providers::{EmbeddingProvider, GenerationProvider};
use crate::session::{SessionDirs, SessionStore, CHUNKS_FILE, CHUNK_SEPARATOR, INDEX_FILE};

/// Fallback answer when the generation provider returns nothing usable
pub const EMPTY_ANSWER_FALLBACK: &str =
    "No answer could be generated from the provided documents.";

/// One retrieved chunk with its rank and distance
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub rank: usize,
    pub distance: f32,
    pub text: String,
}

/// Answer pipeline over a session's persisted index
pub struct RetrievalEngine {
    sessions: SessionStore,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn GenerationProvider>,
    max_top_k: usize,
}

impl RetrievalEngine {
    pub fn new(
        config: &AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn GenerationProvider>,
    ) -> Self {
        Self {
            sessions: SessionStore::from_config(&config.storage),
            embedder,
            llm,
            max_top_k: config.retrieval.max_top_k,
        }
    }

    /// Answer a question against a previously ingested session
    pub async fn answer(&self, session_id: &str, question: &str, top_k: usize) -> Result<String> {
        let top_k = top_k.clamp(1, self.max_top_k);
        let dirs = self.sessions.directories_for(session_id)?;

        let (index, chunk_texts) = load_session_index(&dirs)?;
        let retrieved = self
            .retrieve(&index, &chunk_texts, session_id, question, top_k)
            .await?;

        if retrieved.is_empty() {
            tracing::warn!(session_id = %session_id, "no relevant chunks found");
        }

        let context_chunks: Vec<String> = retrieved.into_iter().map(|r| r.text).collect();
        let context = PromptBuilder::build_context(&context_chunks);
        let prompt = PromptBuilder::build_context_qa(question, &context);

        tracing::info!(
            session_id = %session_id,
            context_length = context.len(),
            question_preview = %question.chars().take(100).collect::<String>(),
            "prompt constructed"
        );

        let answer = self.llm.generate(&prompt).await?;

        if answer.trim().is_empty() {
            tracing::warn!(session_id = %session_id, "empty generation output");
            return Ok(EMPTY_ANSWER_FALLBACK.to_string());
        }

        Ok(answer)
    }

    /// Embed the question and collect the top-k chunk texts in rank order
    async fn retrieve(
        &self,
        index: &FlatIndex,
        chunk_texts: &[String],
        session_id: &str,
        question: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>> {
        let query_vector = self.embedder.embed_one(question).await?;
        let neighbors = index.search(&query_vector, top_k)?;

        let mut retrieved = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            // Out-of-range positions cannot occur while the length invariant
            // holds; drop them rather than panic if it ever breaks.
            let Some(text) = chunk_texts.get(neighbor.position) else {
                continue;
            };

            tracing::info!(
                session_id = %session_id,
                rank = neighbor.rank,
                distance = neighbor.distance,
                "retrieval hit"
            );

            retrieved.push(RetrievedChunk {
                rank: neighbor.rank,
                distance: neighbor.distance,
                text: text.clone(),
            });
        }

        Ok(retrieved)
    }
}

/// Load the index/chunk pair for a session, cross-checking the invariant
fn load_session_index(dirs: &SessionDirs) -> Result<(FlatIndex, Vec<String>)> {
    let index = FlatIndex::load(dirs.index_dir.join(INDEX_FILE))?;

    let chunks_path = dirs.index_dir.join(CHUNKS_FILE);
    if !chunks_path.is_file() {
        return Err(Error::IndexNotFound(chunks_path.display().to_string()));
    }
    let raw = std::fs::read_to_string(&chunks_path)?;
    let chunk_texts: Vec<String> = raw.split(CHUNK_SEPARATOR).map(str::to_string).collect();

    if chunk_texts.len() != index.len() {
        return Err(Error::IndexCorrupt(format!(
            "{} chunks on disk but {} vectors in index for session {}",
            chunk_texts.len(),
            index.len(),
            dirs.session_id
        )));
    }

    Ok((index, chunk_texts))
}
