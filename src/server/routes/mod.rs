//! API routes for the document chat server

pub mod ingest;
pub mod jobs;
pub mod query;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build the `/chat` route tree
pub fn chat_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/index",
            post(ingest::index_documents).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/query", post(query::query_session))
        .route("/jobs/:id", get(jobs::get_job_status))
}
