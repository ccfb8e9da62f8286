pub mod loader;
pub mod models;

pub use loader::{TrainingTable, REQUIRED_COLUMNS, TARGET_COLUMN};
pub use models::{Observation, TrainingRecord, FEATURE_COUNT};
