//! docuchat: session-scoped document Q&A service
//!
//! Upload documents into an isolated session, index them into an exact
//! nearest-neighbour vector store, and ask questions answered strictly from
//! the uploaded content. Embeddings come from the Hugging Face inference
//! API; answers from Groq or Google Gemini.

pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod processing;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod types;

pub use config::{ApiKeys, AppConfig};
pub use error::{Error, Result};
pub use types::{
    document::{DocumentFormat, RawDocument},
    query::QueryRequest,
    response::{IndexResponse, JobStatusResponse, QueryResponse},
};
