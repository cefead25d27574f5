//! Query request types

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Natural-language question
    pub question: String,
    /// Session id returned from indexing
    pub session_id: String,
    /// Number of chunks to retrieve; falls back to the configured
    /// `retrieval.default_top_k` when omitted, clamped to the maximum
    #[serde(default)]
    pub top_k: Option<usize>,
}
