//! The reactive view-state controller
//!
//! Three operations keep the table, the breed chart, and the map
//! consistent: a filter change re-queries the store and resets the row
//! selection; the breed distribution and the map focus are then derived
//! from the settled row set. Each operation takes its inputs explicitly
//! and returns the next state; nothing reactive lives in module state.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::data::RecordSource;
use crate::events::events::{FilterApplied, SelectionChanged, StoreFailure, TableDataChanged};
use crate::events::EventBus;
use crate::filters::{query_for, RescueFilter};
use crate::record::{AnimalRecord, ColumnDescriptor};

/// Table state emitted to the presentation surface
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// Rows matching the active filter, in store order
    pub rows: Vec<AnimalRecord>,
    /// Column descriptors derived from the row shape
    pub columns: &'static [ColumnDescriptor],
    /// Highlighted row; `None` only when the row set is empty
    pub selected: Option<usize>,
}

impl TableState {
    /// Build table state from a freshly queried row set, with the
    /// selection reset to the first row
    pub fn from_rows(rows: Vec<AnimalRecord>) -> Self {
        let selected = if rows.is_empty() { None } else { Some(0) };
        Self {
            rows,
            columns: AnimalRecord::columns(),
            selected,
        }
    }
}

/// Count of records per distinct breed, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreedDistribution {
    counts: IndexMap<String, usize>,
}

impl BreedDistribution {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct breeds
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Count for one breed
    pub fn count(&self, breed: &str) -> usize {
        self.counts.get(breed).copied().unwrap_or(0)
    }

    /// Total records across all breeds
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(breed, count)| (breed.as_str(), *count))
    }
}

/// Coordinate and descriptive fields for the focused record
#[derive(Debug, Clone, PartialEq)]
pub struct MapFocus {
    pub latitude: f64,
    pub longitude: f64,
    pub breed: String,
    pub name: String,
}

/// Fully settled dashboard state after a reactive operation
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// The active filter preset; `None` is Reset
    pub filter: Option<RescueFilter>,
    pub table: TableState,
    pub breeds: BreedDistribution,
    pub focus: Option<MapFocus>,
}

/// Breed counts over the table's current rows
pub fn breed_distribution(rows: &[AnimalRecord]) -> BreedDistribution {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for row in rows {
        *counts.entry(row.breed.clone()).or_insert(0) += 1;
    }
    BreedDistribution { counts }
}

/// Map focal point for the effective selection
///
/// An empty selection falls back to row 0; an empty row set yields
/// `None` instead of indexing into nothing.
pub fn map_focus(rows: &[AnimalRecord], selected: Option<usize>) -> Option<MapFocus> {
    if rows.is_empty() {
        return None;
    }
    let index = selected.unwrap_or(0);
    // A stale index past the end falls back to the top row
    let row = rows.get(index).unwrap_or(&rows[0]);
    Some(MapFocus {
        latitude: row.location_lat,
        longitude: row.location_long,
        breed: row.breed.clone(),
        name: row.name.clone(),
    })
}

/// The reactive core driving the dashboard
pub struct DashboardController {
    source: Arc<dyn RecordSource>,
    events: Arc<EventBus>,
}

impl DashboardController {
    pub fn new(source: Arc<dyn RecordSource>, events: Arc<EventBus>) -> Self {
        Self { source, events }
    }

    /// React to a filter change: re-query, reset the selection, and
    /// re-derive the chart and map state from the settled row set
    pub async fn on_filter_change(
        &self,
        selection: Option<RescueFilter>,
    ) -> Result<DashboardState> {
        let query = query_for(selection);
        debug!(?selection, constraints = query.len(), "applying filter");

        let rows = match self.source.fetch(&query).await {
            Ok(rows) => rows,
            Err(error) => {
                self.events.publish(StoreFailure {
                    operation: "read_all".to_string(),
                    error: error.to_string(),
                });
                return Err(error).context("filter query failed");
            }
        };

        let table = TableState::from_rows(rows);
        self.events.publish(FilterApplied {
            filter: selection,
            row_count: table.rows.len(),
        });

        // Derived state reads the settled table, never the in-flight query
        let breeds = breed_distribution(&table.rows);
        self.events.publish(TableDataChanged { row_count: table.rows.len() });
        let focus = map_focus(&table.rows, table.selected);

        info!(
            ?selection,
            rows = table.rows.len(),
            breeds = breeds.len(),
            "filter change settled"
        );

        Ok(DashboardState {
            filter: selection,
            table,
            breeds,
            focus,
        })
    }

    /// React to a change in the table's displayed rows by recomputing
    /// the breed distribution and re-deriving the focus
    pub fn on_table_data_change(&self, state: &mut DashboardState) {
        state.breeds = breed_distribution(&state.table.rows);
        state.focus = map_focus(&state.table.rows, state.table.selected);
        self.events.publish(TableDataChanged { row_count: state.table.rows.len() });
    }

    /// React to a row selection change by re-deriving the map focus
    /// from the current rows and the new selection
    pub fn on_selection_change(&self, state: &mut DashboardState, selected: Option<usize>) {
        state.table.selected = selected;
        state.focus = map_focus(&state.table.rows, selected);
        self.events.publish(SelectionChanged { row: selected });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    /// In-memory source applying queries to a fixed row set
    struct FixtureSource {
        rows: Vec<AnimalRecord>,
    }

    #[async_trait]
    impl RecordSource for FixtureSource {
        async fn fetch(&self, query: &Query) -> Result<Vec<AnimalRecord>> {
            Ok(self
                .rows
                .iter()
                .filter(|row| query.matches(&row.to_document()))
                .cloned()
                .collect())
        }

        fn source_name(&self) -> &str {
            "fixture"
        }
    }

    fn dog(name: &str, breed: &str, sex: &str, weeks: f64) -> AnimalRecord {
        AnimalRecord {
            animal_id: format!("A-{name}"),
            animal_type: "Dog".to_string(),
            breed: breed.to_string(),
            color: "Brown".to_string(),
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            datetime: NaiveDate::from_ymd_opt(2016, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            monthyear: "2016-06".to_string(),
            outcome_type: "Adoption".to_string(),
            outcome_subtype: String::new(),
            sex_upon_outcome: sex.to_string(),
            age_upon_outcome: "1 year".to_string(),
            age_upon_outcome_in_weeks: weeks,
            location_lat: 30.75 + weeks / 1000.0,
            location_long: -97.48,
        }
    }

    fn fixture() -> Vec<AnimalRecord> {
        vec![
            // Two water-rescue candidates
            dog("Luna", "Labrador Retriever Mix", "Intact Female", 60.0),
            dog("Bella", "Newfoundland", "Intact Female", 100.0),
            // Three that miss the preset on breed, sex, or age
            dog("Rex", "Poodle", "Intact Female", 60.0),
            dog("Max", "Labrador Retriever Mix", "Intact Male", 60.0),
            dog("Daisy", "Newfoundland", "Intact Female", 200.0),
        ]
    }

    fn controller(rows: Vec<AnimalRecord>) -> DashboardController {
        DashboardController::new(
            Arc::new(FixtureSource { rows }),
            Arc::new(EventBus::new()),
        )
    }

    #[tokio::test]
    async fn water_rescue_selects_matching_rows_and_resets_selection() {
        let controller = controller(fixture());

        let state = controller
            .on_filter_change(Some(RescueFilter::Water))
            .await
            .unwrap();

        assert_eq!(state.table.rows.len(), 2);
        assert!(state.table.rows.iter().all(|r| r.sex_upon_outcome == "Intact Female"));
        assert_eq!(state.table.selected, Some(0));
        assert_eq!(state.table.columns, AnimalRecord::columns());
    }

    #[tokio::test]
    async fn reset_returns_the_full_row_set() {
        let controller = controller(fixture());

        let filtered = controller
            .on_filter_change(Some(RescueFilter::Water))
            .await
            .unwrap();
        let reset = controller.on_filter_change(None).await.unwrap();

        assert!(filtered.table.rows.len() < reset.table.rows.len());
        assert_eq!(reset.table.rows.len(), fixture().len());
    }

    #[tokio::test]
    async fn repeated_filter_application_is_idempotent() {
        let controller = controller(fixture());

        let first = controller
            .on_filter_change(Some(RescueFilter::Water))
            .await
            .unwrap();
        let second = controller
            .on_filter_change(Some(RescueFilter::Water))
            .await
            .unwrap();

        assert_eq!(first.table.rows, second.table.rows);
        assert_eq!(first.table.selected, second.table.selected);
    }

    #[tokio::test]
    async fn derived_state_follows_the_settled_table() {
        let controller = controller(fixture());

        let state = controller
            .on_filter_change(Some(RescueFilter::Water))
            .await
            .unwrap();

        assert_eq!(state.breeds.total(), state.table.rows.len());
        let focus = state.focus.unwrap();
        assert_eq!(focus.breed, state.table.rows[0].breed);
    }

    #[test]
    fn breed_distribution_counts_distinct_breeds() {
        let rows = vec![
            dog("a", "Labrador", "Intact Female", 60.0),
            dog("b", "Labrador", "Intact Female", 61.0),
            dog("c", "Husky", "Intact Male", 62.0),
        ];

        let breeds = breed_distribution(&rows);

        assert_eq!(breeds.len(), 2);
        assert_eq!(breeds.count("Labrador"), 2);
        assert_eq!(breeds.count("Husky"), 1);
    }

    #[test]
    fn no_selection_defaults_to_the_first_row() {
        let rows = fixture();

        assert_eq!(map_focus(&rows, None), map_focus(&rows, Some(0)));
    }

    #[test]
    fn empty_table_yields_an_empty_map_state() {
        assert_eq!(map_focus(&[], None), None);
        assert_eq!(map_focus(&[], Some(3)), None);
    }

    #[test]
    fn stale_selection_falls_back_to_the_top_row() {
        let rows = fixture();

        assert_eq!(map_focus(&rows, Some(99)), map_focus(&rows, Some(0)));
    }

    #[tokio::test]
    async fn external_table_edits_recount_the_breeds() {
        let controller = controller(fixture());
        let mut state = controller.on_filter_change(None).await.unwrap();
        let before = state.breeds.clone();

        // The distribution follows the displayed rows, not the filter
        state.table.rows.truncate(1);
        controller.on_table_data_change(&mut state);

        assert_ne!(state.breeds, before);
        assert_eq!(state.breeds.total(), 1);
        assert_eq!(state.focus.as_ref().unwrap().breed, state.table.rows[0].breed);
    }

    #[tokio::test]
    async fn selection_change_rederives_the_focus() {
        let controller = controller(fixture());
        let mut state = controller.on_filter_change(None).await.unwrap();

        controller.on_selection_change(&mut state, Some(2));

        assert_eq!(state.table.selected, Some(2));
        let focus = state.focus.unwrap();
        assert_eq!(focus.name, state.table.rows[2].name);
    }
}
