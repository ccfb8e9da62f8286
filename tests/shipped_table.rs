use std::{collections::BTreeSet, path::PathBuf};

use moodquest_lib::{
    dataset::{Observation, TrainingTable},
    error::{DataError, PredictError},
    form::{Field, FormInput, MUSIC_CHOICES},
    inference::{ForestConfig, InferenceEngine},
    presentation::verify_coverage,
};
use pretty_assertions::assert_eq;

fn shipped_table() -> TrainingTable {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/observations.csv");
    TrainingTable::load(path).unwrap()
}

fn engine() -> InferenceEngine {
    InferenceEngine::train(&shipped_table(), &ForestConfig::default()).unwrap()
}

fn observations() -> Vec<Observation> {
    let mut observations = Vec::new();
    for sleep in [3, 6, 8] {
        for steps in [3000, 9000, 15000] {
            for music in MUSIC_CHOICES {
                for memes in [0, 8] {
                    let input = FormInput {
                        sleep_hours: sleep,
                        steps,
                        music: music.to_string(),
                        memes_sent: memes,
                        shower: memes == 0,
                        ..FormInput::default()
                    };
                    observations.push(input.to_observation());
                }
            }
        }
    }
    observations
}

#[test]
fn shipped_table_covers_every_mood() {
    let labels: BTreeSet<String> = shipped_table()
        .records()
        .iter()
        .map(|record| record.current_state.clone())
        .collect();

    let expected: BTreeSet<String> = [
        "hungry",
        "lazy_mode",
        "missing_you",
        "outside_chilling",
        "overthinking",
        "productive",
        "sleepy",
        "social_mood",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(labels, expected);
    assert!(verify_coverage(&labels.into_iter().collect::<Vec<_>>()).is_ok());
}

#[test]
fn predictions_stay_inside_the_trained_label_set() {
    let engine = engine();

    for observation in observations() {
        let prediction = engine.predict(&observation).unwrap();
        assert!(engine.labels().contains(&prediction.state), "{prediction:?}");
        assert!((0.0..=100.0).contains(&prediction.confidence), "{prediction:?}");
    }
}

#[test]
fn predictions_are_repeatable() {
    let engine = engine();

    for observation in observations() {
        let first = engine.predict(&observation).unwrap();
        let second = engine.predict(&observation).unwrap();
        assert_eq!(first.state, second.state);
        assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
    }
}

#[test]
fn retraining_reproduces_the_model() {
    let first = engine();
    let second = engine();

    for observation in observations() {
        assert_eq!(
            first.predict(&observation).unwrap(),
            second.predict(&observation).unwrap()
        );
    }
}

#[test]
fn music_categories_round_trip() {
    let engine = engine();
    let encoder = engine.music_encoder();

    assert_eq!(engine.music_categories(), &["calm", "loud", "none"]);
    for category in engine.music_categories() {
        let code = encoder.transform(category).unwrap();
        assert_eq!(encoder.inverse_transform(code), Some(category.as_str()));
    }
}

#[test]
fn techno_is_an_unknown_category() {
    let engine = engine();
    let mut input = FormInput::default();
    input.set(Field::Music, "techno").unwrap();

    let err = engine.predict(&input.to_observation()).unwrap_err();
    assert!(
        matches!(&err, PredictError::UnknownCategory(unknown) if unknown.value == "techno"),
        "{err:?}"
    );
}

#[test]
fn header_only_table_cannot_be_trained() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(
        &path,
        "sleep_hours_last_night,hours_since_last_meal,water_intake_glasses,steps_walked,shower_today,went_outside_today,sent_memes_today,music_listened,boredom_level,current_state\n",
    )
    .unwrap();

    let table = TrainingTable::load(&path).unwrap();
    let err = InferenceEngine::train(&table, &ForestConfig::default()).unwrap_err();
    assert!(matches!(err, DataError::EmptyTable));
}
