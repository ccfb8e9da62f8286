use serde::Serialize;

use crate::{error::MissingPresentationDataError, log_error};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub icon: &'static str,
    pub message: &'static str,
}

pub fn present(label: &str) -> Result<Presentation, MissingPresentationDataError> {
    let (icon, message) = match label {
        "sleepy" => ("😴", "Go to sleep already."),
        "hungry" => ("🍕", "Eat something. One snack won't hurt."),
        "lazy_mode" => ("🛌", "Open the laptop and write some code."),
        "productive" => ("💻", "Look at you, getting things done."),
        "social_mood" => ("😄", "Someone is in a chatty mood."),
        "outside_chilling" => ("🌤", "Out having fun without me."),
        "overthinking" => ("🧠", "Stop overthinking, leave that to me."),
        "missing_you" => ("❤️", "Awwww. I miss you too."),
        _ => {
            return Err(MissingPresentationDataError {
                label: label.to_string(),
            })
        }
    };
    Ok(Presentation { icon, message })
}

/// Fails on the first trained label that has no message or icon.
pub fn verify_coverage<S: AsRef<str>>(labels: &[S]) -> Result<(), MissingPresentationDataError> {
    for label in labels {
        if let Err(err) = present(label.as_ref()) {
            log_error!("Presentation table does not cover trained label '{}'", err.label);
            return Err(err);
        }
    }
    Ok(())
}

/// Two-decimal percentage, e.g. `87.33%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{confidence:.2}%")
}
