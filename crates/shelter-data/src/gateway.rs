//! CRUD gateway over the record store
//!
//! The gateway is a thin, fail-fast pass-through: presence checks on the
//! way in, record-shape validation on the way out, one store call per
//! operation. It holds no mutable state, so concurrent calls are safe.

use std::sync::Arc;

use async_trait::async_trait;
use shelter_core::data::RecordSource;
use shelter_core::{AnimalRecord, Document, Query, UpdateSpec};
use tracing::warn;

use crate::store::{DeleteOutcome, DocumentStore, UpdateOutcome};
use crate::GatewayError;

/// Data-access gateway for a single animal collection
pub struct ShelterGateway {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ShelterGateway {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// The collection this gateway reads and writes
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Insert one record document
    ///
    /// The document must be present, non-empty, and decode into an
    /// [`AnimalRecord`]; otherwise the store is not touched.
    pub async fn create(&self, document: Option<Document>) -> Result<(), GatewayError> {
        let document = match document.filter(|doc| !doc.is_empty()) {
            Some(document) => document,
            None => {
                warn!("create called without a document");
                return Err(GatewayError::InvalidInput);
            }
        };
        AnimalRecord::from_document(&document).map_err(GatewayError::Decode)?;

        self.store.insert_one(&self.collection, document).await?;
        Ok(())
    }

    /// Get the first record matching `query`
    pub async fn read_one(&self, query: Option<&Query>) -> Result<AnimalRecord, GatewayError> {
        let query = require_selective(query)?;
        let document = self
            .store
            .find_one(&self.collection, query)
            .await?
            .ok_or(GatewayError::NotFound)?;
        AnimalRecord::from_document(&document).map_err(GatewayError::Decode)
    }

    /// Get every record matching `query`
    ///
    /// An empty-but-present query is valid and matches everything; an
    /// empty result set is success, not failure.
    pub async fn read_all(&self, query: Option<&Query>) -> Result<Vec<AnimalRecord>, GatewayError> {
        let query = match query {
            Some(query) => query,
            None => {
                warn!("read_all called without a query");
                return Err(GatewayError::InvalidInput);
            }
        };

        let documents = self.store.find(&self.collection, query).await?;
        documents
            .iter()
            .map(|doc| AnimalRecord::from_document(doc).map_err(GatewayError::Decode))
            .collect()
    }

    /// Apply `update` to every record matching `query`
    pub async fn update(
        &self,
        query: Option<&Query>,
        update: &UpdateSpec,
    ) -> Result<UpdateOutcome, GatewayError> {
        let query = require_selective(query)?;
        Ok(self.store.update_many(&self.collection, query, update).await?)
    }

    /// Remove every record matching `query`
    pub async fn delete(&self, query: Option<&Query>) -> Result<DeleteOutcome, GatewayError> {
        let query = require_selective(query)?;
        Ok(self.store.delete_many(&self.collection, query).await?)
    }
}

/// Reject absent and empty queries for the single-record and mutating verbs
fn require_selective(query: Option<&Query>) -> Result<&Query, GatewayError> {
    match query.filter(|q| !q.is_empty()) {
        Some(query) => Ok(query),
        None => {
            warn!("operation called without a selective query");
            Err(GatewayError::InvalidInput)
        }
    }
}

#[async_trait]
impl RecordSource for ShelterGateway {
    async fn fetch(&self, query: &Query) -> anyhow::Result<Vec<AnimalRecord>> {
        Ok(self.read_all(Some(query)).await?)
    }

    fn source_name(&self) -> &str {
        self.store.store_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::StoreError;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store stub that counts every call it receives
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for CountingStore {
        async fn insert_one(&self, _: &str, _: Document) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn find_one(&self, _: &str, _: &Query) -> Result<Option<Document>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn find(&self, _: &str, _: &Query) -> Result<Vec<Document>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn update_many(
            &self,
            _: &str,
            _: &Query,
            _: &UpdateSpec,
        ) -> Result<UpdateOutcome, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(UpdateOutcome::default())
        }

        async fn delete_many(&self, _: &str, _: &Query) -> Result<DeleteOutcome, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(DeleteOutcome::default())
        }

        fn store_name(&self) -> &str {
            "counting"
        }
    }

    fn record(name: &str, breed: &str, weeks: f64) -> AnimalRecord {
        AnimalRecord {
            animal_id: format!("A-{name}"),
            animal_type: "Dog".to_string(),
            breed: breed.to_string(),
            color: "Tan".to_string(),
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2015, 5, 5).unwrap(),
            datetime: NaiveDate::from_ymd_opt(2016, 7, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            monthyear: "2016-07".to_string(),
            outcome_type: "Adoption".to_string(),
            outcome_subtype: String::new(),
            sex_upon_outcome: "Intact Male".to_string(),
            age_upon_outcome: "1 year".to_string(),
            age_upon_outcome_in_weeks: weeks,
            location_lat: 30.6,
            location_long: -97.3,
        }
    }

    fn memory_gateway() -> ShelterGateway {
        ShelterGateway::new(Arc::new(MemoryStore::new()), "animals")
    }

    #[tokio::test]
    async fn absent_input_never_touches_the_store() {
        let store = Arc::new(CountingStore::default());
        let gateway = ShelterGateway::new(store.clone(), "animals");

        assert!(matches!(gateway.create(None).await, Err(GatewayError::InvalidInput)));
        assert!(matches!(gateway.read_one(None).await, Err(GatewayError::InvalidInput)));
        assert!(matches!(gateway.read_all(None).await, Err(GatewayError::InvalidInput)));
        assert!(matches!(
            gateway.update(None, &UpdateSpec::new()).await,
            Err(GatewayError::InvalidInput)
        ));
        assert!(matches!(gateway.delete(None).await, Err(GatewayError::InvalidInput)));

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_query_is_invalid_except_for_read_all() {
        let store = Arc::new(CountingStore::default());
        let gateway = ShelterGateway::new(store.clone(), "animals");
        let empty = Query::new();

        assert!(matches!(
            gateway.read_one(Some(&empty)).await,
            Err(GatewayError::InvalidInput)
        ));
        assert!(matches!(
            gateway.update(Some(&empty), &UpdateSpec::new()).await,
            Err(GatewayError::InvalidInput)
        ));
        assert!(matches!(
            gateway.delete(Some(&empty)).await,
            Err(GatewayError::InvalidInput)
        ));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);

        // read_all treats the empty query as match-all
        assert!(gateway.read_all(Some(&empty)).await.unwrap().is_empty());
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn create_rejects_empty_and_malformed_documents() {
        let gateway = memory_gateway();

        assert!(matches!(
            gateway.create(Some(Document::new())).await,
            Err(GatewayError::InvalidInput)
        ));

        let mut malformed = record("Luna", "Husky", 40.0).to_document();
        malformed.remove("breed");
        assert!(matches!(
            gateway.create(Some(malformed)).await,
            Err(GatewayError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn read_all_returns_exactly_the_matching_records() {
        let gateway = memory_gateway();
        for rec in [
            record("Luna", "Husky", 40.0),
            record("Max", "Husky", 200.0),
            record("Rex", "Poodle", 40.0),
        ] {
            gateway.create(Some(rec.to_document())).await.unwrap();
        }

        let query = Query::new()
            .eq("breed", "Husky")
            .lte("age_upon_outcome_in_weeks", 100.0);
        let found = gateway.read_all(Some(&query)).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Luna");
    }

    #[tokio::test]
    async fn read_one_distinguishes_not_found_from_invalid_input() {
        let gateway = memory_gateway();
        gateway
            .create(Some(record("Luna", "Husky", 40.0).to_document()))
            .await
            .unwrap();

        let missing = Query::new().eq("breed", "Dalmatian");
        assert!(matches!(
            gateway.read_one(Some(&missing)).await,
            Err(GatewayError::NotFound)
        ));

        let found = gateway
            .read_one(Some(&Query::new().eq("breed", "Husky")))
            .await
            .unwrap();
        assert_eq!(found.name, "Luna");
    }

    #[tokio::test]
    async fn update_and_delete_report_counts() {
        let gateway = memory_gateway();
        for rec in [record("Luna", "Husky", 40.0), record("Max", "Husky", 50.0)] {
            gateway.create(Some(rec.to_document())).await.unwrap();
        }

        let query = Query::new().eq("breed", "Husky");
        let update = UpdateSpec::new().set("outcome_type", "Transfer");
        let outcome = gateway.update(Some(&query), &update).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 2, modified: 2 });

        let outcome = gateway.delete(Some(&query)).await.unwrap();
        assert_eq!(outcome.deleted, 2);
        assert!(gateway.read_all(Some(&Query::new())).await.unwrap().is_empty());
    }
}
