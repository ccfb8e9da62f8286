pub mod config;
pub mod encoder;
pub mod engine;
pub mod forest;

pub use config::ForestConfig;
pub use encoder::LabelEncoder;
pub use engine::{load_and_train, predict, InferenceEngine, Prediction, MUSIC_COLUMN};
pub use forest::RandomForest;
