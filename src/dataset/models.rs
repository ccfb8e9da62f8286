//! Observation and training-row models.
//!
//! Feature vectors always follow the column order of the training table
//! (minus the target column), with the music column replaced by its code.

use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 9;

/// One request's worth of lifestyle input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub sleep_hours: u32,
    pub hours_since_meal: u32,
    pub water_glasses: u32,
    pub steps: u32,
    pub shower: bool,
    pub went_outside: bool,
    pub memes_sent: u32,
    pub music: String,
    pub boredom: u32,
}

impl Observation {
    pub fn features(&self, music_code: usize) -> [f64; FEATURE_COUNT] {
        [
            self.sleep_hours as f64,
            self.hours_since_meal as f64,
            self.water_glasses as f64,
            self.steps as f64,
            flag(self.shower),
            flag(self.went_outside),
            self.memes_sent as f64,
            music_code as f64,
            self.boredom as f64,
        ]
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// A labeled row of the training table, named after its CSV columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingRecord {
    pub sleep_hours_last_night: f64,
    pub hours_since_last_meal: f64,
    pub water_intake_glasses: f64,
    pub steps_walked: f64,
    pub shower_today: f64,
    pub went_outside_today: f64,
    pub sent_memes_today: f64,
    pub music_listened: String,
    pub boredom_level: f64,
    pub current_state: String,
}

impl TrainingRecord {
    pub fn features(&self, music_code: usize) -> [f64; FEATURE_COUNT] {
        [
            self.sleep_hours_last_night,
            self.hours_since_last_meal,
            self.water_intake_glasses,
            self.steps_walked,
            self.shower_today,
            self.went_outside_today,
            self.sent_memes_today,
            music_code as f64,
            self.boredom_level,
        ]
    }
}
