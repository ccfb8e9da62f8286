pub mod controller;
pub mod puzzles;
pub mod state;

pub use controller::{QuestController, QuestOutcome, QuestSnapshot};
pub use puzzles::{puzzle, Puzzle};
pub use state::{QuestDay, QuestSession, QuestState, SENTINEL_LABEL};
