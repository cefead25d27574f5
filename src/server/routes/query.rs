//! Question answering endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResponse};

/// POST /chat/query - Answer a question against an ingested session
pub async fn query_session(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let top_k = request
        .top_k
        .unwrap_or(state.config().retrieval.default_top_k);

    tracing::info!(
        session_id = %request.session_id,
        top_k,
        "query received"
    );

    let answer = state
        .retrieval()
        .answer(&request.session_id, &request.question, top_k)
        .await?;

    Ok(Json(QueryResponse {
        question: request.question,
        answer,
        session_id: request.session_id,
        top_k,
    }))
}
