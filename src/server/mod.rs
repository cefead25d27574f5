//! HTTP server for the document chat service

pub mod routes;
pub mod state;

use axum::{routing::get, Json, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Document chat HTTP server
pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_check))
            .nest(
                "/chat",
                routes::chat_routes(self.config.server.max_upload_size),
            )
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.server.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::init(format!("Invalid server address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("starting document chat server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::init(format!("Failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    use crate::ingestion::DocumentIngestor;
    use crate::processing::JobQueue;
    use crate::providers::{EmbeddingProvider, GenerationProvider};
    use crate::retrieval::RetrievalEngine;
    use crate::types::RawDocument;

    /// Embeds any text as its first byte, so nearest-neighbor order over the
    /// fixture chunks is known exactly
    struct FirstByteEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FirstByteEmbedder {
        async fn embed_one(&self, text: &str) -> crate::Result<Vec<f32>> {
            Ok(vec![text.as_bytes().first().copied().unwrap_or(0) as f32, 0.0])
        }

        async fn embed_many(&self, texts: &[String]) -> crate::Result<Vec<Vec<f32>>> {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.embed_one(text).await?);
            }
            Ok(out)
        }

        fn name(&self) -> &str {
            "first-byte"
        }
    }

    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GenerationProvider for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> crate::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("stub answer".to_string())
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn model(&self) -> &str {
            "recording-model"
        }
    }

    /// Ingest "aaaaa" / "bbbbb" / "ccccc" chunks and build a router whose
    /// retrieval default is one chunk
    async fn router_fixture(
        root: &std::path::Path,
    ) -> (Router, Arc<RecordingGenerator>, tokio::sync::mpsc::Receiver<crate::processing::IngestJob>)
    {
        let mut config = AppConfig::default();
        config.storage.upload_base = root.join("uploads");
        config.storage.index_base = root.join("indexes");
        config.chunking.chunk_size = 5;
        config.chunking.chunk_overlap = 0;
        config.retrieval.default_top_k = 1;

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(FirstByteEmbedder);
        let generator = Arc::new(RecordingGenerator {
            prompts: Mutex::new(Vec::new()),
        });
        let llm: Arc<dyn GenerationProvider> = generator.clone();

        let ingestor = DocumentIngestor::new(&config, embedder.clone()).unwrap();
        ingestor
            .ingest(
                Some("session_rt"),
                &[RawDocument::new("letters.txt", b"aaaaabbbbbccccc".to_vec())],
            )
            .await
            .unwrap();

        let (queue, receiver) = JobQueue::new(8);
        let retrieval = RetrievalEngine::new(&config, embedder, llm);
        let state = AppState::new(config.clone(), Arc::new(queue), retrieval);
        let router = ApiServer::new(config, state).build_router();
        (router, generator, receiver)
    }

    async fn post_query(router: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/chat/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_omitted_top_k_uses_configured_default() {
        let tmp = tempfile::tempdir().unwrap();
        let (router, generator, _receiver) = router_fixture(tmp.path()).await;

        let (status, json) =
            post_query(router, r#"{"question": "a", "session_id": "session_rt"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["top_k"], 1);
        assert_eq!(json["answer"], "stub answer");

        // default_top_k = 1: only the nearest chunk reaches the prompt
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("aaaaa"));
        assert!(!prompts[0].contains("bbbbb"));
    }

    #[tokio::test]
    async fn test_explicit_top_k_overrides_default() {
        let tmp = tempfile::tempdir().unwrap();
        let (router, generator, _receiver) = router_fixture(tmp.path()).await;

        let (status, json) = post_query(
            router,
            r#"{"question": "a", "session_id": "session_rt", "top_k": 2}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["top_k"], 2);

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("aaaaa"));
        assert!(prompts[0].contains("bbbbb"));
        assert!(!prompts[0].contains("ccccc"));
    }

    #[tokio::test]
    async fn test_query_unknown_session_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let (router, _generator, _receiver) = router_fixture(tmp.path()).await;

        let (status, json) = post_query(
            router,
            r#"{"question": "a", "session_id": "session_missing"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["type"], "session_not_found");
    }
}
