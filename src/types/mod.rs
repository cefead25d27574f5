//! Request, response, and document types

pub mod document;
pub mod query;
pub mod response;

pub use document::{DocumentFormat, RawDocument};
pub use query::QueryRequest;
pub use response::{IndexResponse, JobStatusResponse, QueryResponse};
