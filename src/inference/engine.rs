use std::time::Instant;

use serde::Serialize;

use crate::{
    dataset::{Observation, TrainingTable, TARGET_COLUMN},
    error::{DataError, PredictError},
    log_debug, log_error, log_info,
};

use super::{
    config::ForestConfig,
    encoder::LabelEncoder,
    forest::{argmax, FeatureRow, RandomForest},
};

const ENABLE_LOGS: bool = true;

pub const MUSIC_COLUMN: &str = "music_listened";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub state: String,
    /// Indexed by label code.
    pub probabilities: Vec<f64>,
    /// Probability of `state`, as a percentage.
    pub confidence: f64,
}

/// Fits the encoders and the forest on the whole table.
pub fn load_and_train(
    table: &TrainingTable,
    config: &ForestConfig,
) -> Result<(RandomForest, LabelEncoder, LabelEncoder), DataError> {
    if table.is_empty() {
        return Err(DataError::EmptyTable);
    }

    let started = Instant::now();
    let records = table.records();

    let (music_encoder, music_codes) = LabelEncoder::fit_transform(
        MUSIC_COLUMN,
        records.iter().map(|record| record.music_listened.as_str()),
    );
    let (state_encoder, labels) = LabelEncoder::fit_transform(
        TARGET_COLUMN,
        records.iter().map(|record| record.current_state.as_str()),
    );

    let samples: Vec<FeatureRow> = records
        .iter()
        .zip(music_codes)
        .map(|(record, music)| record.features(music))
        .collect();

    let model = RandomForest::fit(&samples, &labels, state_encoder.len(), config);

    log_info!(
        "Trained {} trees (max depth {}, seed {}) on {} rows in {:?}; labels: {}",
        model.trees().len(),
        config.max_depth,
        config.seed,
        records.len(),
        started.elapsed(),
        state_encoder.classes().join(", ")
    );

    Ok((model, music_encoder, state_encoder))
}

/// Pure function of its inputs: identical observations give identical
/// predictions.
///
/// Fails with `UnknownCategory` for music the encoder never saw. The other
/// variants mean the model and `state_encoder` were not fitted together.
pub fn predict(
    model: &RandomForest,
    music_encoder: &LabelEncoder,
    state_encoder: &LabelEncoder,
    observation: &Observation,
) -> Result<Prediction, PredictError> {
    let music = music_encoder.transform(&observation.music)?;
    let probabilities = model.predict_proba(&observation.features(music));

    let Some(code) = argmax(&probabilities) else {
        log_error!("Empty probability vector for {:?}", observation);
        return Err(PredictError::EmptyDistribution);
    };
    let Some(state) = state_encoder.inverse_transform(code) else {
        let err = PredictError::UndecodableLabel {
            code,
            known: state_encoder.len(),
        };
        log_error!("{}", err);
        return Err(err);
    };
    let confidence = probabilities[code] * 100.0;

    log_debug!(
        "Predicted {} ({:.2}%) for {:?}",
        state,
        confidence,
        observation
    );

    Ok(Prediction {
        state: state.to_string(),
        probabilities,
        confidence,
    })
}

/// The trained model and both encoders, built together and never mutated.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    model: RandomForest,
    music_encoder: LabelEncoder,
    state_encoder: LabelEncoder,
}

impl InferenceEngine {
    pub fn train(table: &TrainingTable, config: &ForestConfig) -> Result<Self, DataError> {
        let (model, music_encoder, state_encoder) = load_and_train(table, config)?;
        Ok(Self {
            model,
            music_encoder,
            state_encoder,
        })
    }

    pub fn predict(&self, observation: &Observation) -> Result<Prediction, PredictError> {
        predict(
            &self.model,
            &self.music_encoder,
            &self.state_encoder,
            observation,
        )
    }

    pub fn labels(&self) -> &[String] {
        self.state_encoder.classes()
    }

    pub fn music_categories(&self) -> &[String] {
        self.music_encoder.classes()
    }

    pub fn music_encoder(&self) -> &LabelEncoder {
        &self.music_encoder
    }
}
