//! Valentine Week Quest puzzles: one per day, each with its own answer rule.
//!
//! Days 2 and 6 compare the raw input exactly; the emoji answers are not
//! trimmed or case-folded.

use serde::Serialize;

use super::state::QuestDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub day: QuestDay,
    pub title: &'static str,
    pub instructions: &'static str,
    /// Shown verbatim, e.g. in a code block.
    pub clue: Option<&'static str>,
    pub input_label: &'static str,
    pub success: &'static str,
}

pub fn puzzle(day: QuestDay) -> Puzzle {
    match day {
        QuestDay::Rose => Puzzle {
            day,
            title: "🌹 Rose Day — Cipher",
            instructions: "Decode this (Caesar shift -1):",
            clue: Some("ZPV"),
            input_label: "Your answer",
            success: "Rose accepted 🌹",
        },
        QuestDay::Teddy => Puzzle {
            day,
            title: "🧸 Teddy Day — Memory",
            instructions: "Memorize: 🐻 🌙 🍕 🎧 ⭐",
            clue: None,
            input_label: "Enter emojis without spaces",
            success: "Teddy unlocked 🧸",
        },
        QuestDay::Chocolate => Puzzle {
            day,
            title: "🍫 Chocolate Day — ASCII Puzzle",
            instructions: "Every number is a character.",
            clue: Some("73 32 108 105 107 101 32 121 111 117"),
            input_label: "Decode the message",
            success: "Chocolate unlocked 🍫",
        },
        QuestDay::Propose => Puzzle {
            day,
            title: "💍 Propose Day — Logic",
            instructions: "If I say:\n  1 + 1 = 1\n  2 + 2 = 1\nWhat does this represent?",
            clue: None,
            input_label: "Your guess",
            success: "Proposal accepted 💍",
        },
        QuestDay::Hug => Puzzle {
            day,
            title: "🤗 Hug Day — Riddle",
            instructions: "I am not a person\nbut I make people feel safe.\nI need no words\nbut I say everything.\nWhat am I?",
            clue: None,
            input_label: "Answer",
            success: "Hug received 🤗",
        },
        QuestDay::Kiss => Puzzle {
            day,
            title: "😘 Kiss Day — Pattern",
            instructions: "Fill the blank:",
            clue: Some("🙂 🙂 🙂 ❤️ 🙂 🙂 ?"),
            input_label: "What comes next?",
            success: "Kiss unlocked 😘",
        },
        QuestDay::Valentine => Puzzle {
            day,
            title: "❤️ Final Day — Valentine",
            instructions: "Happy Valentine's Day ❤️",
            clue: None,
            input_label: "Return to model",
            success: "",
        },
    }
}

/// Whether `input` solves the puzzle for `day`. Day 7 accepts nothing.
pub fn accepts(day: QuestDay, input: &str) -> bool {
    let normalized = || input.trim().to_lowercase();

    match day {
        QuestDay::Rose => normalized() == "you",
        QuestDay::Teddy => input == "🐻🌙🍕🎧⭐",
        QuestDay::Chocolate => normalized() == "i like you",
        QuestDay::Propose => {
            let lowered = input.to_lowercase();
            lowered.contains("love") || lowered.contains("together")
        }
        QuestDay::Hug => matches!(normalized().as_str(), "hug" | "a hug"),
        QuestDay::Kiss => matches!(input, "❤️" | "❤" | "heart"),
        QuestDay::Valentine => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_and_ascii_answers() {
        assert!(accepts(QuestDay::Rose, "  You"));
        assert!(accepts(QuestDay::Chocolate, "I Like You\n"));
        assert!(!accepts(QuestDay::Chocolate, "i like u"));
    }

    #[test]
    fn ascii_clue_spells_the_answer() {
        let clue = puzzle(QuestDay::Chocolate).clue.unwrap();
        let decoded: String = clue
            .split_whitespace()
            .map(|code| char::from(code.parse::<u8>().unwrap()))
            .collect();

        assert!(accepts(QuestDay::Chocolate, &decoded));
    }

    #[test]
    fn hug_accepts_both_forms() {
        assert!(accepts(QuestDay::Hug, "HUG"));
        assert!(accepts(QuestDay::Hug, " a hug "));
        assert!(!accepts(QuestDay::Hug, "a big hug"));
    }

    #[test]
    fn kiss_is_exact() {
        assert!(accepts(QuestDay::Kiss, "❤️"));
        assert!(accepts(QuestDay::Kiss, "❤"));
        assert!(accepts(QuestDay::Kiss, "heart"));
        assert!(!accepts(QuestDay::Kiss, "Heart"));
        assert!(!accepts(QuestDay::Kiss, " heart"));
    }

    #[test]
    fn final_day_takes_no_answer() {
        assert!(!accepts(QuestDay::Valentine, "you"));
    }

    #[test]
    fn every_day_has_a_puzzle() {
        for day in QuestDay::ALL {
            assert_eq!(puzzle(day).day, day);
        }
    }
}
