//! Typed animal record model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schemaless document as stored by the record store
pub type Document = serde_json::Map<String, Value>;

/// One sheltered animal, following the AAC outcomes shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub animal_id: String,
    pub animal_type: String,
    pub breed: String,
    pub color: String,
    /// Empty when the shelter recorded no name
    #[serde(default)]
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub datetime: NaiveDateTime,
    pub monthyear: String,
    pub outcome_type: String,
    #[serde(default)]
    pub outcome_subtype: String,
    pub sex_upon_outcome: String,
    pub age_upon_outcome: String,
    pub age_upon_outcome_in_weeks: f64,
    pub location_lat: f64,
    pub location_long: f64,
}

/// Column descriptor for table display, derived from the record shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Field identifier, matching the serialized field name
    pub id: &'static str,
    /// Header title shown to the user
    pub title: &'static str,
}

const COLUMNS: &[ColumnDescriptor] = &[
    ColumnDescriptor { id: "animal_id", title: "Animal ID" },
    ColumnDescriptor { id: "animal_type", title: "Type" },
    ColumnDescriptor { id: "breed", title: "Breed" },
    ColumnDescriptor { id: "color", title: "Color" },
    ColumnDescriptor { id: "name", title: "Name" },
    ColumnDescriptor { id: "date_of_birth", title: "Date of Birth" },
    ColumnDescriptor { id: "datetime", title: "Outcome Date" },
    ColumnDescriptor { id: "monthyear", title: "Month/Year" },
    ColumnDescriptor { id: "outcome_type", title: "Outcome" },
    ColumnDescriptor { id: "outcome_subtype", title: "Outcome Subtype" },
    ColumnDescriptor { id: "sex_upon_outcome", title: "Sex upon Outcome" },
    ColumnDescriptor { id: "age_upon_outcome", title: "Age upon Outcome" },
    ColumnDescriptor { id: "age_upon_outcome_in_weeks", title: "Age (weeks)" },
    ColumnDescriptor { id: "location_lat", title: "Latitude" },
    ColumnDescriptor { id: "location_long", title: "Longitude" },
];

impl AnimalRecord {
    /// Columns for display, in record-shape order
    pub fn columns() -> &'static [ColumnDescriptor] {
        COLUMNS
    }

    /// Display text for a single column of this record
    pub fn field_text(&self, column_id: &str) -> String {
        match column_id {
            "animal_id" => self.animal_id.clone(),
            "animal_type" => self.animal_type.clone(),
            "breed" => self.breed.clone(),
            "color" => self.color.clone(),
            "name" => self.name.clone(),
            "date_of_birth" => self.date_of_birth.to_string(),
            "datetime" => self.datetime.format("%Y-%m-%d %H:%M").to_string(),
            "monthyear" => self.monthyear.clone(),
            "outcome_type" => self.outcome_type.clone(),
            "outcome_subtype" => self.outcome_subtype.clone(),
            "sex_upon_outcome" => self.sex_upon_outcome.clone(),
            "age_upon_outcome" => self.age_upon_outcome.clone(),
            "age_upon_outcome_in_weeks" => format!("{:.1}", self.age_upon_outcome_in_weeks),
            "location_lat" => format!("{:.4}", self.location_lat),
            "location_long" => format!("{:.4}", self.location_long),
            _ => String::new(),
        }
    }

    /// Serialize into a store document
    pub fn to_document(&self) -> Document {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct always serializes to an object
            _ => Document::new(),
        }
    }

    /// Validate a store document into a typed record
    pub fn from_document(document: &Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(document.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnimalRecord {
        AnimalRecord {
            animal_id: "A721033".to_string(),
            animal_type: "Dog".to_string(),
            breed: "Labrador Retriever Mix".to_string(),
            color: "Black/White".to_string(),
            name: "Luna".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2015, 3, 2).unwrap(),
            datetime: NaiveDate::from_ymd_opt(2016, 4, 18)
                .unwrap()
                .and_hms_opt(15, 46, 0)
                .unwrap(),
            monthyear: "2016-04".to_string(),
            outcome_type: "Transfer".to_string(),
            outcome_subtype: "Partner".to_string(),
            sex_upon_outcome: "Intact Female".to_string(),
            age_upon_outcome: "1 year".to_string(),
            age_upon_outcome_in_weeks: 58.5,
            location_lat: 30.5066,
            location_long: -97.3408,
        }
    }

    #[test]
    fn document_roundtrip() {
        let record = sample();
        let doc = record.to_document();

        assert_eq!(doc.get("breed").and_then(|v| v.as_str()), Some("Labrador Retriever Mix"));
        assert_eq!(AnimalRecord::from_document(&doc).unwrap(), record);
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let mut doc = sample().to_document();
        doc.remove("name");

        let record = AnimalRecord::from_document(&doc).unwrap();
        assert!(record.name.is_empty());
    }

    #[test]
    fn malformed_document_is_rejected() {
        let mut doc = sample().to_document();
        doc.remove("breed");

        assert!(AnimalRecord::from_document(&doc).is_err());
    }

    #[test]
    fn columns_cover_every_field() {
        let record = sample();
        let doc = record.to_document();

        for column in AnimalRecord::columns() {
            assert!(doc.contains_key(column.id), "column {} missing from record", column.id);
            assert!(!record.field_text(column.id).is_empty());
        }
        assert_eq!(AnimalRecord::columns().len(), doc.len());
    }
}
