use std::io::{BufRead, Write};

use anyhow::Result;

use crate::{
    commands::{confirm_quest_return, get_quest_snapshot, run_inference, submit_quest_answer},
    error::CommandError,
    form::{Field, FormInput, MUSIC_CHOICES},
    log_warn,
    models::UserSession,
    quest::{QuestDay, QuestOutcome, QuestState},
    AppState,
};

use super::render;

const ENABLE_LOGS: bool = true;

const QUIT: &str = ":q";
const CONFIRM_WORDS: [&str; 3] = ["return", "r", "y"];

enum Step {
    Continue,
    Quit,
}

/// Line-oriented host: one render pass per user action.
pub struct TerminalHost<R, W> {
    input: R,
    output: W,
    form: FormInput,
    show_probabilities: bool,
}

impl<R: BufRead, W: Write> TerminalHost<R, W> {
    pub fn new(input: R, output: W, show_probabilities: bool) -> Self {
        Self {
            input,
            output,
            form: FormInput::default(),
            show_probabilities,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the input ends or the user quits. Only internal faults
    /// are returned as errors.
    pub fn run(&mut self, state: &AppState, session: &mut UserSession) -> Result<()> {
        loop {
            let step = if session.quest.unlocked {
                self.quest_pass(session)?
            } else {
                self.form_pass(state, session)?
            };
            if let Step::Quit = step {
                return Ok(());
            }
        }
    }

    fn form_pass(&mut self, state: &AppState, session: &mut UserSession) -> Result<Step> {
        render::header(&mut self.output)?;

        for field in Field::ALL {
            loop {
                let label = match field {
                    Field::Music => format!("{} ({})", field.label(), MUSIC_CHOICES.join("/")),
                    _ => field.label().to_string(),
                };
                let current = self.form.display(field);
                render::prompt(&mut self.output, &label, Some(current.as_str()))?;

                let Some(line) = self.read_line()? else {
                    return Ok(Step::Quit);
                };
                if line.trim() == QUIT {
                    return Ok(Step::Quit);
                }
                match self.form.set(field, &line) {
                    Ok(()) => break,
                    Err(err) => writeln!(self.output, "{err}")?,
                }
            }
        }

        match run_inference(state, session, &self.form) {
            Ok(report) => {
                render::report(&mut self.output, &report, self.show_probabilities)?;
                if report.quest == QuestOutcome::Unlocked {
                    render::unlocked(&mut self.output)?;
                }
            }
            Err(err @ CommandError::RejectedInput(_)) => {
                log_warn!("{}", err);
                writeln!(self.output, "{err}")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Step::Continue)
    }

    fn quest_pass(&mut self, session: &mut UserSession) -> Result<Step> {
        let snapshot = get_quest_snapshot(session);
        let Some(puzzle) = snapshot.puzzle else {
            return Ok(Step::Continue);
        };
        render::quest(&mut self.output, &snapshot.session, &puzzle)?;

        let final_day = snapshot.state == QuestState::Day(QuestDay::Valentine);
        let label = if final_day {
            format!("{} (type 'return')", puzzle.input_label)
        } else {
            puzzle.input_label.to_string()
        };
        render::prompt(&mut self.output, &label, None)?;

        let Some(line) = self.read_line()? else {
            return Ok(Step::Quit);
        };
        if line.trim() == QUIT {
            return Ok(Step::Quit);
        }

        if final_day {
            if CONFIRM_WORDS.contains(&line.trim().to_lowercase().as_str()) {
                confirm_quest_return(session);
            }
            return Ok(Step::Continue);
        }

        if let QuestOutcome::Advanced { .. } = submit_quest_answer(session, &line) {
            writeln!(self.output, "{}", puzzle.success)?;
        }
        Ok(Step::Continue)
    }

    /// Next line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::{TrainingRecord, TrainingTable},
        inference::ForestConfig,
        quest::QuestSession,
    };
    use std::io::Cursor;

    fn record(memes: f64, music: &str, state: &str) -> TrainingRecord {
        TrainingRecord {
            sleep_hours_last_night: 6.0,
            hours_since_last_meal: 3.0,
            water_intake_glasses: 6.0,
            steps_walked: 6000.0,
            shower_today: 0.0,
            went_outside_today: 0.0,
            sent_memes_today: memes,
            music_listened: music.into(),
            boredom_level: 3.0,
            current_state: state.into(),
        }
    }

    fn app_state() -> AppState {
        let mut records = Vec::new();
        for _ in 0..10 {
            records.push(record(8.0, "calm", "missing_you"));
            records.push(record(0.0, "none", "sleepy"));
        }
        AppState::from_table(
            &TrainingTable::from_records(records),
            &ForestConfig {
                n_trees: 10,
                ..ForestConfig::default()
            },
        )
        .unwrap()
    }

    fn drive(script: &str, session: &mut UserSession) -> String {
        let state = app_state();
        let mut host = TerminalHost::new(Cursor::new(script.to_string()), Vec::new(), false);
        host.run(&state, session).unwrap();
        String::from_utf8(host.into_output()).unwrap()
    }

    #[test]
    fn default_form_predicts_and_stays_locked() {
        let mut session = UserSession::new();
        let output = drive(&"\n".repeat(9), &mut session);

        assert!(output.contains("Predicted State: sleepy"));
        assert!(output.contains("Model confidence:"));
        assert!(!session.quest.unlocked);
    }

    #[test]
    fn unknown_music_is_reported_and_the_loop_continues() {
        let mut session = UserSession::new();
        let script = "\n\n\n\n\n\n\ntechno\n\n:q\n";
        let output = drive(script, &mut session);

        assert!(output.contains("Rejected input"));
        assert_eq!(session.predictions, 0);
    }

    #[test]
    fn bad_field_value_is_asked_again() {
        let mut session = UserSession::new();
        let script = "lots\n6\n\n\n\n\n\n\n\n\n:q\n";
        let output = drive(script, &mut session);

        assert!(output.contains("expects a whole number"));
        assert_eq!(session.predictions, 1);
    }

    #[test]
    fn sentinel_opens_the_quest_and_a_full_week_returns() {
        let mut session = UserSession::new();
        let script = [
            "", "", "", "", "", "", "8", "calm", "",
            "banana", "YOU ", "🐻🌙🍕🎧⭐", "I like you", "we are together now", "a hug", "heart",
            "return",
            ":q",
        ]
        .join("\n");

        let output = drive(&format!("{script}\n"), &mut session);

        assert!(output.contains("Rare Emotional Event Detected"));
        assert!(output.contains("Rose accepted 🌹"));
        assert!(output.contains("Kiss unlocked 😘"));
        assert!(output.contains("Current Day: 7/7"));
        assert_eq!(session.quest, QuestSession::default());
    }

    #[test]
    fn end_of_input_mid_quest_keeps_progress() {
        let mut session = UserSession::new();
        session.quest = QuestSession { unlocked: true, day: 3 };

        let output = drive("i like you\n", &mut session);

        assert!(output.contains("Chocolate unlocked"));
        assert_eq!(session.quest, QuestSession { unlocked: true, day: 4 });
    }
}
