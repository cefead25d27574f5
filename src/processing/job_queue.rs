//! In-memory job queue for background ingestion
//!
//! Job records are held in a `DashMap` so route handlers can poll status
//! while the worker runs. Records do not survive a restart.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::types::RawDocument;

/// Lifecycle of an ingestion job
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

/// One submitted ingestion job, carried over the channel to the worker
#[derive(Debug)]
pub struct IngestJob {
    pub id: Uuid,
    pub session_id: String,
    pub documents: Vec<RawDocument>,
}

/// Pollable state of a job
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: Uuid,
    pub session_id: String,
    pub status: JobStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    /// Set once the job completes
    pub chunk_count: Option<usize>,
    /// Set once the job fails
    pub error: Option<String>,
}

/// Queue shared between route handlers and the ingestion worker
pub struct JobQueue {
    records: Arc<DashMap<Uuid, JobRecord>>,
    sender: mpsc::Sender<IngestJob>,
}

impl JobQueue {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<IngestJob>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let queue = Self {
            records: Arc::new(DashMap::new()),
            sender,
        };
        (queue, receiver)
    }

    /// Submit documents for ingestion into a session
    pub async fn submit(&self, session_id: String, documents: Vec<RawDocument>) -> Uuid {
        let job = IngestJob {
            id: Uuid::new_v4(),
            session_id: session_id.clone(),
            documents,
        };
        let job_id = job.id;

        self.records.insert(
            job_id,
            JobRecord {
                id: job_id,
                session_id,
                status: JobStatus::Queued,
                submitted_at: chrono::Utc::now(),
                chunk_count: None,
                error: None,
            },
        );

        if let Err(e) = self.sender.send(job).await {
            tracing::error!(job_id = %job_id, error = %e, "failed to enqueue job");
            self.mark_failed(job_id, &e.to_string());
        }

        job_id
    }

    pub fn status(&self, job_id: Uuid) -> Option<JobRecord> {
        self.records.get(&job_id).map(|r| r.clone())
    }

    pub fn mark_processing(&self, job_id: Uuid) {
        if let Some(mut record) = self.records.get_mut(&job_id) {
            record.status = JobStatus::Processing;
        }
    }

    pub fn mark_completed(&self, job_id: Uuid, chunk_count: usize) {
        if let Some(mut record) = self.records.get_mut(&job_id) {
            record.status = JobStatus::Completed;
            record.chunk_count = Some(chunk_count);
        }
    }

    pub fn mark_failed(&self, job_id: Uuid, error: &str) {
        if let Some(mut record) = self.records.get_mut(&job_id) {
            record.status = JobStatus::Failed;
            record.error = Some(error.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_records_queued_job() {
        let (queue, mut receiver) = JobQueue::new(8);

        let job_id = queue
            .submit(
                "session_t".to_string(),
                vec![RawDocument::new("a.txt", b"hello".to_vec())],
            )
            .await;

        let record = queue.status(job_id).unwrap();
        assert_eq!(record.status, JobStatus::Queued);
        assert_eq!(record.session_id, "session_t");
        assert!(record.chunk_count.is_none());

        let job = receiver.recv().await.unwrap();
        assert_eq!(job.id, job_id);
        assert_eq!(job.documents.len(), 1);
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let (queue, _receiver) = JobQueue::new(8);
        let job_id = queue.submit("session_t".to_string(), Vec::new()).await;

        queue.mark_processing(job_id);
        assert_eq!(queue.status(job_id).unwrap().status, JobStatus::Processing);

        queue.mark_completed(job_id, 42);
        let record = queue.status(job_id).unwrap();
        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.chunk_count, Some(42));
    }

    #[tokio::test]
    async fn test_failure_keeps_error_message() {
        let (queue, _receiver) = JobQueue::new(8);
        let job_id = queue.submit("session_t".to_string(), Vec::new()).await;

        queue.mark_failed(job_id, "no content could be extracted");
        let record = queue.status(job_id).unwrap();
        assert_eq!(record.status, JobStatus::Failed);
        assert_eq!(
            record.error.as_deref(),
            Some("no content could be extracted")
        );
    }

    #[test]
    fn test_unknown_job_has_no_status() {
        let (queue, _receiver) = JobQueue::new(8);
        assert!(queue.status(Uuid::new_v4()).is_none());
    }
}
