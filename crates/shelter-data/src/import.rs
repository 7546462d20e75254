//! CSV import for shelter outcome exports
//!
//! Reads an AAC-style CSV export into typed records. Rows that fail
//! validation are skipped with a warning rather than aborting the
//! import, so one bad row does not lose a whole export.

use std::io::Read;
use std::path::Path;

use shelter_core::AnimalRecord;
use tracing::{info, warn};

use crate::ImportError;

/// Read records from a CSV file path
pub fn read_csv_records<P: AsRef<Path>>(path: P) -> Result<Vec<AnimalRecord>, ImportError> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path)?;
    let records = collect_records(reader)?;
    info!(path = %path.display(), count = records.len(), "imported shelter records");
    Ok(records)
}

/// Read records from any CSV reader
pub fn read_csv_from<R: Read>(reader: R) -> Result<Vec<AnimalRecord>, ImportError> {
    collect_records(csv::Reader::from_reader(reader))
}

fn collect_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<AnimalRecord>, ImportError> {
    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<AnimalRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(error) if error.is_io_error() => return Err(error.into()),
            Err(error) => {
                warn!(row = index + 1, %error, "skipping malformed CSV row");
            }
        }
    }
    Ok(records)
}
