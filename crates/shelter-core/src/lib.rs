//! Core functionality for the rescue animal dashboard
//!
//! This crate provides the record model, the filter catalog, and the
//! reactive view-state controller that keeps the table, the breed chart,
//! and the map consistent.

pub mod controller;
pub mod events;
pub mod filters;
pub mod query;
pub mod record;
pub mod state;

// Re-export commonly used types
pub use controller::{
    breed_distribution, map_focus, BreedDistribution, DashboardController, DashboardState,
    MapFocus, TableState,
};
pub use data::RecordSource;
pub use filters::{query_for, RescueFilter};
pub use query::{Constraint, Query, UpdateSpec};
pub use record::{AnimalRecord, ColumnDescriptor, Document};
pub use state::DashboardSettings;

/// Data-source seam implemented by the data-access crate
pub mod data {
    use crate::query::Query;
    use crate::record::AnimalRecord;

    /// Trait for record sources backing the dashboard
    #[async_trait::async_trait]
    pub trait RecordSource: Send + Sync {
        /// Fetch every record matching `query`
        async fn fetch(&self, query: &Query) -> anyhow::Result<Vec<AnimalRecord>>;

        /// Get the source name for logging
        fn source_name(&self) -> &str;
    }
}
