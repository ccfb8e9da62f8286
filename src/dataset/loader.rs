use std::{fs::File, io::Read, path::Path};

use crate::{error::DataError, log_info};

use super::models::TrainingRecord;

const ENABLE_LOGS: bool = true;

pub const TARGET_COLUMN: &str = "current_state";

pub const REQUIRED_COLUMNS: [&str; 10] = [
    "sleep_hours_last_night",
    "hours_since_last_meal",
    "water_intake_glasses",
    "steps_walked",
    "shower_today",
    "went_outside_today",
    "sent_memes_today",
    "music_listened",
    "boredom_level",
    TARGET_COLUMN,
];

/// The labeled historical observations. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct TrainingTable {
    records: Vec<TrainingRecord>,
}

impl TrainingTable {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| DataError::Open {
            path: path.to_path_buf(),
            source: csv::Error::from(err),
        })?;

        let table = Self::from_reader(file)?;
        log_info!(
            "Loaded {} training rows from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Reads a CSV table, checking the header before any row is parsed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(DataError::Read)?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(DataError::MissingColumn(column.to_string()));
            }
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<TrainingRecord>().enumerate() {
            let record = row.map_err(|source| DataError::Malformed {
                row: index + 1,
                source,
            })?;
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<TrainingRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
