//! Document store abstraction
//!
//! The store is an opaque collaborator: it accepts a query predicate and
//! returns matching documents or count-bearing results for bulk
//! mutations. The internal document id never appears in query results.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use shelter_core::{Document, Query, UpdateSpec};

use crate::StoreError;

/// Result of a bulk update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matching the query
    pub matched: u64,
    /// Documents actually modified
    pub modified: u64,
}

/// Result of a bulk delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Documents removed
    pub deleted: u64,
}

/// Trait for document stores
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document into a collection
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Get the first document matching `query`, if any
    async fn find_one(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Option<Document>, StoreError>;

    /// Get every document matching `query`
    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Apply `update` to every document matching `query`
    async fn update_many(
        &self,
        collection: &str,
        query: &Query,
        update: &UpdateSpec,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Remove every document matching `query`
    async fn delete_many(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<DeleteOutcome, StoreError>;

    /// Get the store name for logging
    fn store_name(&self) -> &str;
}
