//! Ingestion job status endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::JobStatusResponse;

/// GET /chat/jobs/:id - Poll the status of a queued ingestion job
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobStatusResponse>> {
    let record = state
        .job_queue()
        .status(job_id)
        .ok_or(Error::JobNotFound(job_id))?;

    Ok(Json(JobStatusResponse {
        job_id: record.id,
        session_id: record.session_id,
        status: record.status,
        submitted_at: record.submitted_at,
        chunk_count: record.chunk_count,
        error: record.error,
    }))
}
