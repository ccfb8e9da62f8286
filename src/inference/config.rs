use serde::{Deserialize, Serialize};

/// Hyperparameters for the random forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of bagged trees
    pub n_trees: usize,

    /// Depth cap; keeps the trees from memorizing a small table
    pub max_depth: usize,

    /// Nodes with fewer samples than this become leaves
    pub min_samples_split: usize,

    /// Seed for bootstrap sampling and feature selection
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 300,
            max_depth: 8,
            min_samples_split: 2,
            seed: 42,
        }
    }
}
