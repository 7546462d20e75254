//! Store seeding
//!
//! Populates an empty store, either from a shelter CSV export or from
//! built-in fixture records covering all three rescue presets.

use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use shelter_core::events::events::RecordsSeeded;
use shelter_core::events::EventBus;
use shelter_core::{AnimalRecord, Query};
use shelter_data::{import, ShelterGateway};
use tracing::{info, warn};

/// Seed the collection when it is empty; returns the records inserted
pub async fn seed_if_empty(
    gateway: &ShelterGateway,
    events: &EventBus,
    seed_csv: Option<&Path>,
) -> Result<usize> {
    let existing = gateway
        .read_all(Some(&Query::new()))
        .await
        .context("failed to check store contents")?;
    if !existing.is_empty() {
        info!(count = existing.len(), "store already populated, skipping seed");
        return Ok(0);
    }

    let records = match seed_csv {
        Some(path) => import::read_csv_records(path)
            .with_context(|| format!("failed to import {}", path.display()))?,
        None => fixture_records(),
    };

    let mut inserted = 0;
    for record in &records {
        match gateway.create(Some(record.to_document())).await {
            Ok(()) => inserted += 1,
            Err(error) => warn!(animal_id = %record.animal_id, %error, "skipping seed record"),
        }
    }

    events.publish(RecordsSeeded { count: inserted });
    info!(inserted, "seeded record store");
    Ok(inserted)
}

fn record(
    animal_id: &str,
    animal_type: &str,
    breed: &str,
    color: &str,
    name: &str,
    sex: &str,
    weeks: f64,
    lat: f64,
    long: f64,
) -> AnimalRecord {
    AnimalRecord {
        animal_id: animal_id.to_string(),
        animal_type: animal_type.to_string(),
        breed: breed.to_string(),
        color: color.to_string(),
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2015, 6, 15).unwrap(),
        datetime: NaiveDate::from_ymd_opt(2016, 11, 5)
            .unwrap()
            .and_hms_opt(10, 20, 0)
            .unwrap(),
        monthyear: "2016-11".to_string(),
        outcome_type: "Adoption".to_string(),
        outcome_subtype: String::new(),
        sex_upon_outcome: sex.to_string(),
        age_upon_outcome: "1 year".to_string(),
        age_upon_outcome_in_weeks: weeks,
        location_lat: lat,
        location_long: long,
    }
}

/// Built-in fixture set: candidates for every preset, several records
/// that match no preset, and one animal with no recorded name
fn fixture_records() -> Vec<AnimalRecord> {
    vec![
        // Water rescue candidates
        record("A731203", "Dog", "Labrador Retriever Mix", "Black/White", "Luna", "Intact Female", 60.0, 30.5066, -97.3408),
        record("A735551", "Dog", "Newfoundland", "Black", "Bella", "Intact Female", 120.0, 30.3188, -97.7243),
        record("A742289", "Dog", "Chesapeake Bay Retriever", "Brown", "", "Intact Female", 90.0, 30.4474, -97.6598),
        // Mountain rescue candidates
        record("A708332", "Dog", "Siberian Husky", "Gray/White", "Maximus", "Intact Male", 72.0, 30.2743, -97.7418),
        record("A712845", "Dog", "German Shepherd", "Tan/Black", "Rocky", "Intact Male", 104.0, 30.4057, -97.6849),
        record("A724067", "Dog", "Alaskan Malamute", "Gray", "Nanook", "Intact Male", 58.0, 30.5461, -97.5482),
        // Disaster rescue candidates
        record("A718921", "Dog", "Bloodhound", "Red", "Copper", "Intact Male", 150.0, 30.6510, -97.4502),
        record("A729674", "Dog", "Doberman Pinsch", "Black/Tan", "Ace", "Intact Male", 250.0, 30.3562, -97.5021),
        // Outside every preset
        record("A746650", "Cat", "Domestic Shorthair Mix", "Calico", "Mittens", "Spayed Female", 40.0, 30.2564, -97.7309),
        record("A739516", "Dog", "Poodle Miniature Mix", "White", "Coco", "Spayed Female", 30.0, 30.4912, -97.6211),
        record("A716387", "Dog", "Labrador Retriever Mix", "Yellow", "Duke", "Neutered Male", 60.0, 30.3821, -97.7109),
        record("A704925", "Dog", "Newfoundland", "Black", "Willow", "Intact Female", 250.0, 30.2954, -97.6732),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelter_core::RescueFilter;
    use shelter_data::MemoryStore;
    use std::sync::Arc;

    fn gateway() -> ShelterGateway {
        ShelterGateway::new(Arc::new(MemoryStore::new()), "animals")
    }

    #[tokio::test]
    async fn seeds_an_empty_store_once() {
        let gateway = gateway();
        let events = EventBus::new();

        let first = seed_if_empty(&gateway, &events, None).await.unwrap();
        assert_eq!(first, fixture_records().len());

        // Second run finds the data and inserts nothing
        let second = seed_if_empty(&gateway, &events, None).await.unwrap();
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn fixtures_cover_every_preset() {
        let gateway = gateway();
        let events = EventBus::new();
        seed_if_empty(&gateway, &events, None).await.unwrap();

        for filter in RescueFilter::ALL {
            let matches = gateway.read_all(Some(&filter.query())).await.unwrap();
            assert!(!matches.is_empty(), "{filter} matches no fixture");
        }

        // Reset still sees the full set
        let all = gateway.read_all(Some(&Query::new())).await.unwrap();
        assert_eq!(all.len(), fixture_records().len());
    }
}
