//! Form fields the host collects, with their bounds and defaults.
//!
//! Numeric values are clamped into range when the observation is built.
//! Music is passed through as typed so an unseen category reaches the
//! encoder and gets rejected there.

use serde::{Deserialize, Serialize};

use crate::dataset::Observation;

pub const MUSIC_CHOICES: [&str; 3] = ["none", "calm", "loud"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    SleepHours,
    HoursSinceMeal,
    WaterGlasses,
    Steps,
    Shower,
    WentOutside,
    MemesSent,
    Music,
    Boredom,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::SleepHours,
        Field::HoursSinceMeal,
        Field::WaterGlasses,
        Field::Steps,
        Field::Shower,
        Field::WentOutside,
        Field::MemesSent,
        Field::Music,
        Field::Boredom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::SleepHours => "😴 Sleep hours last night",
            Field::HoursSinceMeal => "🍽 Hours since last meal",
            Field::WaterGlasses => "💧 Water intake (glasses)",
            Field::Steps => "👟 Steps walked today",
            Field::Shower => "🚿 Shower taken today?",
            Field::WentOutside => "🌤 Went outside today?",
            Field::MemesSent => "😂 Memes sent today",
            Field::Music => "🎧 Music listened",
            Field::Boredom => "🧍 Boredom level",
        }
    }

    /// Inclusive range for numeric fields.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        match self {
            Field::SleepHours => Some((3, 8)),
            Field::HoursSinceMeal => Some((0, 10)),
            Field::WaterGlasses => Some((3, 12)),
            Field::Steps => Some((3000, 15000)),
            Field::MemesSent => Some((0, 8)),
            Field::Boredom => Some((1, 5)),
            Field::Shower | Field::WentOutside | Field::Music => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field:?} expects a whole number, got '{value}'")]
    NotANumber { field: Field, value: String },

    #[error("{field:?} expects 0/1 or yes/no, got '{value}'")]
    NotABoolean { field: Field, value: String },
}

/// Raw form values as the host collected them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub sleep_hours: i64,
    pub hours_since_meal: i64,
    pub water_glasses: i64,
    pub steps: i64,
    pub shower: bool,
    pub went_outside: bool,
    pub memes_sent: i64,
    pub music: String,
    pub boredom: i64,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            sleep_hours: 6,
            hours_since_meal: 3,
            water_glasses: 6,
            steps: 6000,
            shower: false,
            went_outside: false,
            memes_sent: 2,
            music: MUSIC_CHOICES[0].to_string(),
            boredom: 3,
        }
    }
}

impl FormInput {
    /// Current value of a field, formatted for a prompt.
    pub fn display(&self, field: Field) -> String {
        match field {
            Field::SleepHours => self.sleep_hours.to_string(),
            Field::HoursSinceMeal => self.hours_since_meal.to_string(),
            Field::WaterGlasses => self.water_glasses.to_string(),
            Field::Steps => self.steps.to_string(),
            Field::Shower => u8::from(self.shower).to_string(),
            Field::WentOutside => u8::from(self.went_outside).to_string(),
            Field::MemesSent => self.memes_sent.to_string(),
            Field::Music => self.music.clone(),
            Field::Boredom => self.boredom.to_string(),
        }
    }

    /// Applies one raw host value. Blank input keeps the current value.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<(), FieldError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }

        match field {
            Field::Shower => self.shower = parse_flag(field, raw)?,
            Field::WentOutside => self.went_outside = parse_flag(field, raw)?,
            Field::Music => self.music = raw.to_string(),
            _ => {
                let value = raw.parse::<i64>().map_err(|_| FieldError::NotANumber {
                    field,
                    value: raw.to_string(),
                })?;
                match field {
                    Field::SleepHours => self.sleep_hours = value,
                    Field::HoursSinceMeal => self.hours_since_meal = value,
                    Field::WaterGlasses => self.water_glasses = value,
                    Field::Steps => self.steps = value,
                    Field::MemesSent => self.memes_sent = value,
                    Field::Boredom => self.boredom = value,
                    Field::Shower | Field::WentOutside | Field::Music => {}
                }
            }
        }
        Ok(())
    }

    pub fn to_observation(&self) -> Observation {
        Observation {
            sleep_hours: clamp(Field::SleepHours, self.sleep_hours),
            hours_since_meal: clamp(Field::HoursSinceMeal, self.hours_since_meal),
            water_glasses: clamp(Field::WaterGlasses, self.water_glasses),
            steps: clamp(Field::Steps, self.steps),
            shower: self.shower,
            went_outside: self.went_outside,
            memes_sent: clamp(Field::MemesSent, self.memes_sent),
            music: self.music.clone(),
            boredom: clamp(Field::Boredom, self.boredom),
        }
    }
}

fn clamp(field: Field, value: i64) -> u32 {
    match field.bounds() {
        Some((low, high)) => value.clamp(i64::from(low), i64::from(high)) as u32,
        None => value.max(0) as u32,
    }
}

fn parse_flag(field: Field, raw: &str) -> Result<bool, FieldError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "true" => Ok(true),
        "0" | "n" | "no" | "false" => Ok(false),
        _ => Err(FieldError::NotABoolean {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_build_a_mid_range_observation() {
        let observation = FormInput::default().to_observation();

        assert_eq!(
            observation,
            Observation {
                sleep_hours: 6,
                hours_since_meal: 3,
                water_glasses: 6,
                steps: 6000,
                shower: false,
                went_outside: false,
                memes_sent: 2,
                music: "none".into(),
                boredom: 3,
            }
        );
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let input = FormInput {
            sleep_hours: 14,
            hours_since_meal: -2,
            water_glasses: 1,
            steps: 40_000,
            memes_sent: 99,
            boredom: 0,
            ..FormInput::default()
        };
        let observation = input.to_observation();

        assert_eq!(observation.sleep_hours, 8);
        assert_eq!(observation.hours_since_meal, 0);
        assert_eq!(observation.water_glasses, 3);
        assert_eq!(observation.steps, 15000);
        assert_eq!(observation.memes_sent, 8);
        assert_eq!(observation.boredom, 1);
    }

    #[test]
    fn set_parses_each_kind_of_field() {
        let mut input = FormInput::default();
        input.set(Field::Steps, " 12000 ").unwrap();
        input.set(Field::Shower, "yes").unwrap();
        input.set(Field::Music, "loud").unwrap();
        input.set(Field::Boredom, "").unwrap();

        assert_eq!(input.steps, 12000);
        assert!(input.shower);
        assert_eq!(input.music, "loud");
        assert_eq!(input.boredom, 3);
    }

    #[test]
    fn set_rejects_garbage() {
        let mut input = FormInput::default();

        assert!(matches!(
            input.set(Field::SleepHours, "lots"),
            Err(FieldError::NotANumber { .. })
        ));
        assert!(matches!(
            input.set(Field::WentOutside, "maybe"),
            Err(FieldError::NotABoolean { .. })
        ));
    }

    #[test]
    fn unknown_music_is_kept_for_the_encoder_to_reject() {
        let mut input = FormInput::default();
        input.set(Field::Music, "techno").unwrap();

        assert_eq!(input.to_observation().music, "techno");
    }
}
