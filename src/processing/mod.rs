//! Background ingestion processing

mod job_queue;
mod worker;

pub use job_queue::{IngestJob, JobQueue, JobRecord, JobStatus};
pub use worker::IngestWorker;
