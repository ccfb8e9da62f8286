use std::io::{self, Write};

use crate::{
    commands::InferenceReport,
    presentation::format_confidence,
    quest::{Puzzle, QuestSession},
};

const RULE: &str = "---";

pub fn header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "🧠 Mood State Inference")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Input Observations (Enter keeps the value in brackets, :q quits)")
}

pub fn report(out: &mut impl Write, report: &InferenceReport, show_probabilities: bool) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "🧾 Model Output")?;
    writeln!(out, "{} Predicted State: {}", report.icon, report.state)?;
    writeln!(out, "{}", report.message)?;
    writeln!(out, "Model confidence: {}", report.confidence_display)?;

    if show_probabilities {
        for (label, probability) in &report.probabilities {
            writeln!(out, "  {label:<18} {}", format_confidence(probability * 100.0))?;
        }
    }
    writeln!(out, "{RULE}")?;
    writeln!(out, "Model trained on observational lifestyle data. Accuracy improves with snacks.")
}

pub fn unlocked(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Rare Emotional Event Detected ❤️")
}

pub fn quest(out: &mut impl Write, session: &QuestSession, puzzle: &Puzzle) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "I miss you too ❤️")?;
    writeln!(out, "You unlocked the hidden world")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "🔐 Valentine Week Quest")?;
    writeln!(out, "Complete each day to reach the final message")?;
    writeln!(out, "Current Day: {}/7", session.day)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "{}", puzzle.title)?;
    writeln!(out, "{}", puzzle.instructions)?;
    if let Some(clue) = puzzle.clue {
        writeln!(out, "    {clue}")?;
    }
    Ok(())
}

pub fn prompt(out: &mut impl Write, label: &str, current: Option<&str>) -> io::Result<()> {
    match current {
        Some(current) => write!(out, "{label} [{current}]: ")?,
        None => write!(out, "{label}: ")?,
    }
    out.flush()
}
