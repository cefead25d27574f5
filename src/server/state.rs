//! Shared application state for the HTTP server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::processing::JobQueue;
use crate::retrieval::RetrievalEngine;
use crate::session::SessionStore;

/// Shared application state, cheap to clone
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    sessions: SessionStore,
    job_queue: Arc<JobQueue>,
    retrieval: RetrievalEngine,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        job_queue: Arc<JobQueue>,
        retrieval: RetrievalEngine,
    ) -> Self {
        let sessions = SessionStore::from_config(&config.storage);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                sessions,
                job_queue,
                retrieval,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    pub fn job_queue(&self) -> &JobQueue {
        &self.inner.job_queue
    }

    pub fn retrieval(&self) -> &RetrievalEngine {
        &self.inner.retrieval
    }
}
