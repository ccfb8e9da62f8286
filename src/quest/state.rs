use serde::{Deserialize, Serialize};

use super::puzzles;

/// Predicted label that opens the quest.
pub const SENTINEL_LABEL: &str = "missing_you";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestDay {
    Rose,
    Teddy,
    Chocolate,
    Propose,
    Hug,
    Kiss,
    Valentine,
}

impl QuestDay {
    pub const ALL: [QuestDay; 7] = [
        QuestDay::Rose,
        QuestDay::Teddy,
        QuestDay::Chocolate,
        QuestDay::Propose,
        QuestDay::Hug,
        QuestDay::Kiss,
        QuestDay::Valentine,
    ];

    pub fn number(self) -> u8 {
        match self {
            QuestDay::Rose => 1,
            QuestDay::Teddy => 2,
            QuestDay::Chocolate => 3,
            QuestDay::Propose => 4,
            QuestDay::Hug => 5,
            QuestDay::Kiss => 6,
            QuestDay::Valentine => 7,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn is_final(self) -> bool {
        self == QuestDay::Valentine
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestState {
    #[default]
    Inactive,
    Day(QuestDay),
}

/// Opens the quest when an inactive session sees the sentinel label.
/// An active quest is never reset by further predictions.
pub fn unlock(state: QuestState, label: &str) -> QuestState {
    match state {
        QuestState::Inactive if label == SENTINEL_LABEL => QuestState::Day(QuestDay::Rose),
        other => other,
    }
}

/// Moves to the next day when `input` solves the current puzzle.
/// Day 7 takes no text answer; it only leaves through [`confirm_return`].
pub fn advance(state: QuestState, input: &str) -> QuestState {
    match state {
        QuestState::Day(day) if !day.is_final() && puzzles::accepts(day, input) => {
            day.next().map_or(state, QuestState::Day)
        }
        other => other,
    }
}

pub fn confirm_return(state: QuestState) -> QuestState {
    match state {
        QuestState::Day(QuestDay::Valentine) => QuestState::Inactive,
        other => other,
    }
}

/// Session-scoped flags as the host stores them.
///
/// `day` stays in 1..=7 and reads 1 whenever the quest is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestSession {
    pub unlocked: bool,
    pub day: u8,
}

impl Default for QuestSession {
    fn default() -> Self {
        Self {
            unlocked: false,
            day: 1,
        }
    }
}

impl QuestSession {
    pub fn state(&self) -> QuestState {
        if !self.unlocked {
            return QuestState::Inactive;
        }
        QuestState::Day(QuestDay::from_number(self.day).unwrap_or(QuestDay::Rose))
    }
}

impl From<QuestState> for QuestSession {
    fn from(state: QuestState) -> Self {
        match state {
            QuestState::Inactive => Self::default(),
            QuestState::Day(day) => Self {
                unlocked: true,
                day: day.number(),
            },
        }
    }
}
