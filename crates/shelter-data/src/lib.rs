//! Data access for the rescue animal dashboard
//!
//! The [`gateway::ShelterGateway`] is the only caller of the record
//! store; everything above it works with typed [`shelter_core::AnimalRecord`]s.

pub mod gateway;
pub mod import;
pub mod store;

use thiserror::Error;

// Re-exports
pub use gateway::ShelterGateway;
pub use store::{DeleteOutcome, DocumentStore, MemoryStore, SqliteStore, UpdateOutcome};

/// Errors raised by record store implementations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or opened
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The storage engine reported a failure
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("document serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised by the CRUD gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The query or document was absent or empty; the store was not touched
    #[error("no query or document provided")]
    InvalidInput,

    /// A single-record read matched nothing
    #[error("no record matches the query")]
    NotFound,

    /// A document failed validation against the animal record shape
    #[error("document does not match the animal record shape: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while importing shelter CSV exports
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV import error: {0}")]
    Csv(#[from] csv::Error),
}
