//! Rescue-type filter presets
//!
//! A static catalog maps each preset to its query predicate. Adding a
//! preset means adding one catalog entry; nothing else changes.

use once_cell::sync::Lazy;

use crate::query::Query;

/// Named rescue-training filter presets offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RescueFilter {
    Water,
    Mountain,
    Disaster,
}

impl RescueFilter {
    /// All presets, in display order
    pub const ALL: [RescueFilter; 3] =
        [RescueFilter::Water, RescueFilter::Mountain, RescueFilter::Disaster];

    /// Label shown on the filter panel
    pub fn label(&self) -> &'static str {
        match self {
            RescueFilter::Water => "Water Rescue",
            RescueFilter::Mountain => "Mountain Rescue",
            RescueFilter::Disaster => "Disaster Rescue",
        }
    }

    /// The preset's query predicate
    pub fn query(&self) -> Query {
        CATALOG
            .iter()
            .find(|(filter, _)| filter == self)
            .map(|(_, query)| query.clone())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for RescueFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Preset catalog. Breed sets and age windows follow the rescue-training
/// candidate profiles; both ends of each age window are enforced.
static CATALOG: Lazy<Vec<(RescueFilter, Query)>> = Lazy::new(|| {
    vec![
        (
            RescueFilter::Water,
            Query::new()
                .eq("animal_type", "Dog")
                .within(
                    "breed",
                    ["Labrador Retriever Mix", "Chesapeake Bay Retriever", "Newfoundland"],
                )
                .eq("sex_upon_outcome", "Intact Female")
                .gte("age_upon_outcome_in_weeks", 26.0)
                .lte("age_upon_outcome_in_weeks", 156.0),
        ),
        (
            RescueFilter::Mountain,
            Query::new()
                .eq("animal_type", "Dog")
                .within(
                    "breed",
                    [
                        "German Shepherd",
                        "Alaskan Malamute",
                        "Old English Sheepdog",
                        "Siberian Husky",
                        "Rottweiler",
                    ],
                )
                .eq("sex_upon_outcome", "Intact Male")
                .gte("age_upon_outcome_in_weeks", 26.0)
                .lte("age_upon_outcome_in_weeks", 156.0),
        ),
        (
            RescueFilter::Disaster,
            Query::new()
                .eq("animal_type", "Dog")
                // 'Doberman Pinsch' matches the breed name in the data set
                .within(
                    "breed",
                    [
                        "Doberman Pinsch",
                        "German Shepherd",
                        "Golden Retriever",
                        "Bloodhound",
                        "Rottweiler",
                    ],
                )
                .eq("sex_upon_outcome", "Intact Male")
                .gte("age_upon_outcome_in_weeks", 20.0)
                .lte("age_upon_outcome_in_weeks", 300.0),
        ),
    ]
});

/// Query for a filter selection; `None` is Reset and matches everything
pub fn query_for(selection: Option<RescueFilter>) -> Query {
    selection.map(|filter| filter.query()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Constraint;

    #[test]
    fn reset_maps_to_the_universal_query() {
        assert!(query_for(None).is_empty());
    }

    #[test]
    fn every_preset_has_a_catalog_entry() {
        for filter in RescueFilter::ALL {
            assert!(!filter.query().is_empty(), "{filter} has no predicate");
        }
    }

    #[test]
    fn water_rescue_enforces_both_age_bounds() {
        let query = RescueFilter::Water.query();

        assert_eq!(
            query.constraint("age_upon_outcome_in_weeks"),
            Some(&Constraint::Range { min: Some(26.0), max: Some(156.0) })
        );
    }

    #[test]
    fn disaster_rescue_uses_the_dataset_breed_name() {
        let query = RescueFilter::Disaster.query();

        match query.constraint("breed") {
            Some(Constraint::In(members)) => {
                assert!(members.iter().any(|m| m == "Doberman Pinsch"));
            }
            other => panic!("unexpected breed constraint: {other:?}"),
        }
    }
}
