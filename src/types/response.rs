//! Response types for the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::processing::JobStatus;

/// Response for `POST /chat/index`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    pub session_id: String,
    /// Ingestion job id, for polling `GET /chat/jobs/:id`
    pub job_id: Uuid,
    /// Always zero at submission time; the final count is on the job record
    pub total_chunks: usize,
}

/// Response for `POST /chat/query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub question: String,
    pub answer: String,
    pub session_id: String,
    pub top_k: usize,
}

/// Response for `GET /chat/jobs/:id`
#[derive(Debug, Clone, Serialize)]
pub struct JobStatusResponse {
    pub job_id: Uuid,
    pub session_id: String,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
