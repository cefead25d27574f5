//! Document upload and indexing endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{IndexResponse, RawDocument};

/// POST /chat/index - Upload documents into a session and queue ingestion
///
/// Multipart fields: any number of `files` parts, plus an optional
/// `session_id` text part to add documents to an existing session. Without
/// one, a fresh session is minted.
pub async fn index_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IndexResponse>> {
    let mut documents = Vec::new();
    let mut session_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "session_id" {
            let value = field
                .text()
                .await
                .map_err(|e| Error::internal(format!("Failed to read session_id: {}", e)))?;
            if !value.trim().is_empty() {
                session_id = Some(value.trim().to_string());
            }
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            tracing::warn!(field = %name, "skipping multipart field without a filename");
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::internal(format!("Failed to read file '{}': {}", filename, e)))?;

        tracing::info!(filename = %filename, size_bytes = data.len(), "file received");
        documents.push(RawDocument::new(filename, data.to_vec()));
    }

    if documents.is_empty() {
        return Err(Error::NoContentExtracted);
    }
    ensure_any_supported(&documents)?;

    // Resolve the session up front so the client gets its id immediately;
    // the actual extraction and embedding run on the background worker.
    let dirs = state.sessions().resolve_or_create(session_id.as_deref())?;
    let document_count = documents.len();
    let job_id = state
        .job_queue()
        .submit(dirs.session_id.clone(), documents)
        .await;

    tracing::info!(
        session_id = %dirs.session_id,
        job_id = %job_id,
        document_count,
        "ingestion job queued"
    );

    Ok(Json(IndexResponse {
        message: format!(
            "Queued {} document(s) for indexing. Poll /chat/jobs/{} for progress.",
            document_count, job_id
        ),
        session_id: dirs.session_id,
        job_id,
        total_chunks: 0,
    }))
}

/// Reject a batch up front when no file in it has a supported extension
///
/// Individual unsupported files in a mixed batch are still skipped with a
/// warning during ingestion; only a wholly unsupported upload fails here
/// instead of queuing a job that cannot produce content.
fn ensure_any_supported(documents: &[RawDocument]) -> Result<()> {
    if documents.iter().any(|d| d.format().is_some()) {
        return Ok(());
    }
    let names: Vec<&str> = documents.iter().map(|d| d.filename.as_str()).collect();
    Err(Error::UnsupportedFormat(names.join(", ")))
}
