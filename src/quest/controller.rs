use serde::Serialize;

use crate::log_info;

use super::{
    puzzles::{puzzle, Puzzle},
    state::{self, QuestDay, QuestSession, QuestState},
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum QuestOutcome {
    Unlocked,
    Advanced { from: QuestDay, to: QuestDay },
    /// Wrong or empty answer. The same puzzle is shown again.
    Rejected,
    /// The action does not apply to the current state.
    Ignored,
    Returned,
}

impl QuestOutcome {
    /// Whether the host should render again straight away.
    pub fn needs_rerender(&self) -> bool {
        matches!(
            self,
            QuestOutcome::Unlocked | QuestOutcome::Advanced { .. } | QuestOutcome::Returned
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestSnapshot {
    pub session: QuestSession,
    pub state: QuestState,
    pub puzzle: Option<Puzzle>,
}

/// Owns one session's quest flags and applies the pure transitions to them.
#[derive(Debug, Clone, Default)]
pub struct QuestController {
    session: QuestSession,
}

impl QuestController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_session(session: QuestSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> QuestSession {
        self.session
    }

    pub fn state(&self) -> QuestState {
        self.session.state()
    }

    pub fn is_active(&self) -> bool {
        self.session.unlocked
    }

    pub fn snapshot(&self) -> QuestSnapshot {
        let state = self.state();
        QuestSnapshot {
            session: self.session,
            state,
            puzzle: match state {
                QuestState::Inactive => None,
                QuestState::Day(day) => Some(puzzle(day)),
            },
        }
    }

    pub fn observe_prediction(&mut self, label: &str) -> QuestOutcome {
        let before = self.state();
        let after = state::unlock(before, label);
        if after == before {
            return QuestOutcome::Ignored;
        }

        log_info!("Quest unlocked by prediction '{}'", label);
        self.session = after.into();
        QuestOutcome::Unlocked
    }

    pub fn submit_answer(&mut self, input: &str) -> QuestOutcome {
        let before = self.state();
        let from = match before {
            QuestState::Day(day) if !day.is_final() => day,
            _ => return QuestOutcome::Ignored,
        };

        match state::advance(before, input) {
            QuestState::Day(to) if to != from => {
                log_info!("Quest advanced from day {} to day {}", from.number(), to.number());
                self.session = QuestState::Day(to).into();
                QuestOutcome::Advanced { from, to }
            }
            _ => QuestOutcome::Rejected,
        }
    }

    pub fn confirm_return(&mut self) -> QuestOutcome {
        let before = self.state();
        let after = state::confirm_return(before);
        if after == before {
            return QuestOutcome::Ignored;
        }

        log_info!("Quest completed; returning to the model");
        self.session = after.into();
        QuestOutcome::Returned
    }
}
