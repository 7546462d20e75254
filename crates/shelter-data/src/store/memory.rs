//! In-memory document store
//!
//! Default store for tests and demo runs. Collections live behind one
//! read-write lock; document ids stay internal to the store.

use ahash::AHashMap;
use async_trait::async_trait;
use parking_lot::RwLock;
use shelter_core::{Document, Query, UpdateSpec};
use uuid::Uuid;

use super::{DeleteOutcome, DocumentStore, UpdateOutcome};
use crate::StoreError;

/// In-memory document store
pub struct MemoryStore {
    collections: RwLock<AHashMap<String, Vec<(Uuid, Document)>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(AHashMap::new()),
        }
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    /// Whether a collection holds no documents
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        collections
            .entry(collection.to_string())
            .or_insert_with(Vec::new)
            .push((Uuid::new_v4(), document));
        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(_, doc)| query.matches(doc)))
            .map(|(_, doc)| doc.clone()))
    }

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| query.matches(doc))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_many(
        &self,
        collection: &str,
        query: &Query,
        update: &UpdateSpec,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write();
        let mut outcome = UpdateOutcome::default();

        if let Some(docs) = collections.get_mut(collection) {
            for (_, doc) in docs.iter_mut().filter(|(_, doc)| query.matches(doc)) {
                outcome.matched += 1;
                if update.apply(doc) {
                    outcome.modified += 1;
                }
            }
        }
        Ok(outcome)
    }

    async fn delete_many(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.write();
        let mut outcome = DeleteOutcome::default();

        if let Some(docs) = collections.get_mut(collection) {
            let before = docs.len();
            docs.retain(|(_, doc)| !query.matches(doc));
            outcome.deleted = (before - docs.len()) as u64;
        }
        Ok(outcome)
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn doc(breed: &str, weeks: f64) -> Document {
        let mut doc = Document::new();
        doc.insert("breed".to_string(), Value::from(breed));
        doc.insert("age_upon_outcome_in_weeks".to_string(), Value::from(weeks));
        doc
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemoryStore::new();
        store.insert_one("animals", doc("Husky", 30.0)).await.unwrap();
        store.insert_one("animals", doc("Poodle", 12.0)).await.unwrap();

        let all = store.find("animals", &Query::new()).await.unwrap();
        assert_eq!(all.len(), 2);

        let huskies = store
            .find("animals", &Query::new().eq("breed", "Husky"))
            .await
            .unwrap();
        assert_eq!(huskies.len(), 1);
    }

    #[tokio::test]
    async fn results_never_carry_an_internal_id() {
        let store = MemoryStore::new();
        store.insert_one("animals", doc("Husky", 30.0)).await.unwrap();

        let all = store.find("animals", &Query::new()).await.unwrap();
        assert!(all.iter().all(|d| !d.contains_key("_id") && !d.contains_key("id")));
    }

    #[tokio::test]
    async fn update_counts_matched_and_modified() {
        let store = MemoryStore::new();
        store.insert_one("animals", doc("Husky", 30.0)).await.unwrap();
        store.insert_one("animals", doc("Husky", 40.0)).await.unwrap();

        let update = UpdateSpec::new().set("breed", "Siberian Husky");
        let outcome = store
            .update_many("animals", &Query::new().eq("breed", "Husky"), &update)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 2, modified: 2 });

        // Re-running matches nothing under the old breed name
        let outcome = store
            .update_many("animals", &Query::new().eq("breed", "Husky"), &update)
            .await
            .unwrap();
        assert_eq!(outcome.matched, 0);
    }

    #[tokio::test]
    async fn delete_removes_matching_documents_only() {
        let store = MemoryStore::new();
        store.insert_one("animals", doc("Husky", 30.0)).await.unwrap();
        store.insert_one("animals", doc("Poodle", 12.0)).await.unwrap();

        let outcome = store
            .delete_many("animals", &Query::new().eq("breed", "Husky"))
            .await
            .unwrap();

        assert_eq!(outcome.deleted, 1);
        assert_eq!(store.len("animals"), 1);
    }

    #[tokio::test]
    async fn unknown_collection_reads_as_empty() {
        let store = MemoryStore::new();
        let found = store.find("nothing", &Query::new()).await.unwrap();
        assert!(found.is_empty());
    }
}
