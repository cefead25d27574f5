//! Background worker draining the ingestion queue

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::ingestion::DocumentIngestor;

use super::job_queue::{IngestJob, JobQueue};

/// Runs ingestion jobs received from the queue, one at a time
pub struct IngestWorker {
    ingestor: DocumentIngestor,
    queue: Arc<JobQueue>,
}

impl IngestWorker {
    pub fn new(ingestor: DocumentIngestor, queue: Arc<JobQueue>) -> Self {
        Self { ingestor, queue }
    }

    /// Drain the queue until every sender is dropped
    pub async fn run(self, mut receiver: mpsc::Receiver<IngestJob>) {
        tracing::info!("ingestion worker started");

        while let Some(job) = receiver.recv().await {
            let job_id = job.id;
            tracing::info!(
                job_id = %job_id,
                session_id = %job.session_id,
                document_count = job.documents.len(),
                "processing ingestion job"
            );
            self.queue.mark_processing(job_id);

            match self
                .ingestor
                .ingest(Some(&job.session_id), &job.documents)
                .await
            {
                Ok(report) => {
                    self.queue.mark_completed(job_id, report.chunk_count);
                    tracing::info!(
                        job_id = %job_id,
                        chunk_count = report.chunk_count,
                        "ingestion job completed"
                    );
                }
                Err(e) => {
                    self.queue.mark_failed(job_id, &e.to_string());
                    tracing::error!(job_id = %job_id, error = %e, "ingestion job failed");
                }
            }
        }

        tracing::info!("ingestion worker stopped");
    }
}
