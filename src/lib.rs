pub mod commands;
pub mod dataset;
pub mod error;
pub mod form;
pub mod host;
pub mod inference;
pub mod models;
pub mod presentation;
pub mod quest;
pub mod settings;
pub mod utils;

use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use dataset::TrainingTable;
use host::TerminalHost;
use inference::{ForestConfig, InferenceEngine};
use log::info;
use models::UserSession;
use settings::{ModelSettings, SettingsStore};

/// Read-only state shared by every session: the trained model and its
/// encoders.
pub struct AppState {
    pub(crate) engine: InferenceEngine,
}

impl AppState {
    pub fn initialize(model: &ModelSettings) -> anyhow::Result<Self> {
        let table = TrainingTable::load(&model.data_path).with_context(|| {
            format!(
                "Failed to load training table from {}",
                model.data_path.display()
            )
        })?;
        Self::from_table(&table, &model.forest)
    }

    pub fn from_table(table: &TrainingTable, config: &ForestConfig) -> anyhow::Result<Self> {
        let engine = InferenceEngine::train(table, config).context("Failed to train model")?;
        presentation::verify_coverage(engine.labels())?;
        Ok(Self { engine })
    }
}

#[derive(Parser, Debug)]
#[command(name = "moodquest", version, about = "Mood state inference with a hidden quest")]
pub struct Cli {
    /// Settings file; defaults are used when it does not exist
    #[arg(long, env = "MOODQUEST_CONFIG", default_value = "moodquest.json")]
    pub config: PathBuf,

    /// Training table (CSV)
    #[arg(long)]
    pub data: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub trees: Option<usize>,

    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Write the effective model settings back to the settings file
    #[arg(long)]
    pub save_settings: bool,

    /// Print the full probability vector with every prediction
    #[arg(
        long,
        env = "MOODQUEST_DEBUG",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub debug: bool,
}

impl Cli {
    pub fn apply(&self, mut model: ModelSettings) -> ModelSettings {
        if let Some(data) = &self.data {
            model.data_path = data.clone();
        }
        if let Some(seed) = self.seed {
            model.forest.seed = seed;
        }
        if let Some(trees) = self.trees {
            model.forest.n_trees = trees;
        }
        if let Some(max_depth) = self.max_depth {
            model.forest.max_depth = max_depth;
        }
        model
    }
}

pub fn run() -> anyhow::Result<()> {
    // Reads RUST_LOG; defaults to info
    utils::logging::init();

    let cli = Cli::parse();
    info!("moodquest starting up...");

    let mut settings = SettingsStore::new(cli.config.clone())?;
    let model = cli.apply(settings.model().clone());
    if cli.save_settings {
        settings.update_model(model.clone())?;
        info!("Saved model settings to {}", settings.path().display());
    }

    // Retrained from scratch on every start; nothing is cached between runs.
    let state = AppState::initialize(&model)?;
    let show_probabilities = cli.debug || settings.display().show_probabilities;

    let mut session = UserSession::new();
    info!("Session {} started", session.id);

    let stdin = io::stdin();
    let mut host = TerminalHost::new(stdin.lock(), io::stdout(), show_probabilities);
    host.run(&state, &mut session)?;

    info!(
        "Session {} ended ({}) after {} predictions",
        session.id,
        session.status().as_str(),
        session.predictions
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_file_settings() {
        let cli = Cli::parse_from(["moodquest", "--data", "other.csv", "--seed", "7", "--trees", "12"]);
        let model = cli.apply(ModelSettings::default());

        assert_eq!(model.data_path, PathBuf::from("other.csv"));
        assert_eq!(model.forest.seed, 7);
        assert_eq!(model.forest.n_trees, 12);
        assert_eq!(model.forest.max_depth, 8);
    }

    #[test]
    fn debug_env_accepts_numeric_flag() {
        std::env::set_var("MOODQUEST_DEBUG", "1");
        let on = Cli::try_parse_from(["moodquest"]).map(|cli| cli.debug);
        std::env::set_var("MOODQUEST_DEBUG", "0");
        let off = Cli::try_parse_from(["moodquest"]).map(|cli| cli.debug);
        std::env::remove_var("MOODQUEST_DEBUG");

        assert!(on.unwrap());
        assert!(!off.unwrap());
    }

    #[test]
    fn missing_training_table_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let model = ModelSettings {
            data_path: dir.path().join("absent.csv"),
            ..ModelSettings::default()
        };

        let err = AppState::initialize(&model).err().unwrap();
        assert!(format!("{err:#}").contains("Failed to load training table"));
    }
}
