use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quest::QuestSession;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    /// Filling in the form.
    Observing,
    /// The quest owns the screen.
    Questing,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Observing => "Observing",
            SessionStatus::Questing => "Questing",
        }
    }
}

/// Everything one user's interaction owns. Never shared between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub quest: QuestSession,
    pub predictions: u32,
    pub last_state: Option<String>,
}

impl UserSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: now,
            updated_at: now,
            quest: QuestSession::default(),
            predictions: 0,
            last_state: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.quest.unlocked {
            SessionStatus::Questing
        } else {
            SessionStatus::Observing
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for UserSession {
    fn default() -> Self {
        Self::new()
    }
}
