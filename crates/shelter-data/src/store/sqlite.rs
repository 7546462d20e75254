//! SQLite-backed document store
//!
//! Documents are stored as JSON text, one row per document, keyed by an
//! internal id that never leaves the store. Query predicates are
//! evaluated in-process over the decoded documents.

use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::Connection;
use serde_json::Value;
use shelter_core::{Document, Query, UpdateSpec};
use tracing::info;
use uuid::Uuid;

use super::{DeleteOutcome, DocumentStore, UpdateOutcome};
use crate::StoreError;

/// SQLite document store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    label: String,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("failed to open {}: {e}", path.display())))?;
        info!(path = %path.display(), "opened sqlite store");
        Ok(Self {
            conn: Mutex::new(conn),
            label: path.display().to_string(),
        })
    }

    /// Open a transient in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(format!("failed to open in-memory store: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
            label: ":memory:".to_string(),
        })
    }

    fn ensure_collection(conn: &Connection, collection: &str) -> Result<(), StoreError> {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS \"{collection}\" (
                id TEXT PRIMARY KEY,
                doc TEXT NOT NULL
            );"
        ))
        .map_err(backend)
    }

    /// Decode and collect (id, document) pairs matching `query`
    fn matching(
        conn: &Connection,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<(String, Document)>, StoreError> {
        Self::ensure_collection(conn, collection)?;

        let mut stmt = conn
            .prepare(&format!("SELECT id, doc FROM \"{collection}\""))
            .map_err(backend)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(backend)?;

        let mut matched = Vec::new();
        for row in rows {
            let (id, text) = row.map_err(backend)?;
            let document = decode(&text)?;
            if query.matches(&document) {
                matched.push((id, document));
            }
        }
        Ok(matched)
    }
}

fn backend(error: rusqlite::Error) -> StoreError {
    StoreError::Backend(error.to_string())
}

fn decode(text: &str) -> Result<Document, StoreError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend(format!("stored document is not an object: {other}"))),
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        Self::ensure_collection(&conn, collection)?;

        let text = serde_json::to_string(&Value::Object(document))?;
        conn.execute(
            &format!("INSERT INTO \"{collection}\" (id, doc) VALUES (?1, ?2)"),
            (Uuid::new_v4().to_string(), text),
        )
        .map_err(backend)?;
        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Option<Document>, StoreError> {
        let conn = self.conn.lock();
        let mut matched = Self::matching(&conn, collection, query)?;
        Ok(if matched.is_empty() {
            None
        } else {
            Some(matched.swap_remove(0).1)
        })
    }

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let conn = self.conn.lock();
        Ok(Self::matching(&conn, collection, query)?
            .into_iter()
            .map(|(_, doc)| doc)
            .collect())
    }

    async fn update_many(
        &self,
        collection: &str,
        query: &Query,
        update: &UpdateSpec,
    ) -> Result<UpdateOutcome, StoreError> {
        let conn = self.conn.lock();
        let matched = Self::matching(&conn, collection, query)?;

        let mut outcome = UpdateOutcome { matched: matched.len() as u64, modified: 0 };
        for (id, mut document) in matched {
            if update.apply(&mut document) {
                let text = serde_json::to_string(&Value::Object(document))?;
                conn.execute(
                    &format!("UPDATE \"{collection}\" SET doc = ?1 WHERE id = ?2"),
                    (text, id),
                )
                .map_err(backend)?;
                outcome.modified += 1;
            }
        }
        Ok(outcome)
    }

    async fn delete_many(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn.lock();
        let matched = Self::matching(&conn, collection, query)?;

        let mut outcome = DeleteOutcome::default();
        for (id, _) in matched {
            outcome.deleted += conn
                .execute(&format!("DELETE FROM \"{collection}\" WHERE id = ?1"), (id,))
                .map_err(backend)? as u64;
        }
        Ok(outcome)
    }

    fn store_name(&self) -> &str {
        &self.label
    }
}
