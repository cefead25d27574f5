//! Document chat server binary
//!
//! Run with: cargo run --bin docuchat-server [config.toml]

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docuchat::config::{ApiKeys, AppConfig};
use docuchat::ingestion::DocumentIngestor;
use docuchat::processing::{IngestWorker, JobQueue};
use docuchat::providers;
use docuchat::retrieval::RetrievalEngine;
use docuchat::server::{state::AppState, ApiServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docuchat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "loading configuration file");
            AppConfig::load(&path)?
        }
        None => {
            tracing::info!("no configuration file given, using defaults");
            AppConfig::default()
        }
    };
    config.validate()?;

    tracing::info!("  - embedding model: {}", config.embedding.model);
    tracing::info!("  - llm provider: {:?}", config.llm.provider);
    tracing::info!("  - chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - chunk overlap: {}", config.chunking.chunk_overlap);

    // Credentials are validated before anything binds or spawns.
    let keys = ApiKeys::from_env(config.llm.provider)?;

    let embedder = providers::embedding_provider(&config, &keys)?;
    let llm = providers::generation_provider(&config, &keys)?;
    tracing::info!(
        embedder = embedder.name(),
        llm = llm.name(),
        model = llm.model(),
        "providers initialized"
    );

    let (queue, receiver) = JobQueue::new(256);
    let queue = Arc::new(queue);

    let ingestor = DocumentIngestor::new(&config, Arc::clone(&embedder))?;
    let worker = IngestWorker::new(ingestor, Arc::clone(&queue));
    tokio::spawn(worker.run(receiver));

    let retrieval = RetrievalEngine::new(&config, embedder, llm);
    let state = AppState::new(config.clone(), queue, retrieval);

    let server = ApiServer::new(config, state);
    server.start().await?;

    Ok(())
}
