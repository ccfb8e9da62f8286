//! Bagged, depth-bounded CART trees with Gini impurity.
//!
//! Every tree draws its bootstrap sample and its per-node candidate features
//! from its own `StdRng`, seeded from the forest seed, so a forest is fully
//! determined by (samples, labels, config).

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::dataset::FEATURE_COUNT;

use super::config::ForestConfig;

pub type FeatureRow = [f64; FEATURE_COUNT];

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single fitted tree. Nodes live in an arena; the root is index 0.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn predict_proba(&self, row: &FeatureRow) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match &nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

struct TreeBuilder<'a> {
    samples: &'a [FeatureRow],
    labels: &'a [usize],
    n_classes: usize,
    max_features: usize,
    max_depth: usize,
    min_samples_split: usize,
    nodes: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, indices: Vec<usize>, depth: usize, rng: &mut StdRng) -> usize {
        let counts = self.class_counts(&indices);
        let pure = counts.iter().filter(|&&count| count > 0).count() <= 1;

        if depth >= self.max_depth || indices.len() < self.min_samples_split || pure {
            return self.push_leaf(&counts, indices.len());
        }

        let Some(split) = self.best_split(&indices, rng) else {
            return self.push_leaf(&counts, indices.len());
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.samples[i][split.feature] <= split.threshold);

        // Reserve the slot so the root stays at index 0.
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });
        let left = self.build(left, depth + 1, rng);
        let right = self.build(right, depth + 1, rng);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    fn push_leaf(&mut self, counts: &[usize], total: usize) -> usize {
        let distribution = counts
            .iter()
            .map(|&count| {
                if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                }
            })
            .collect();
        self.nodes.push(Node::Leaf { distribution });
        self.nodes.len() - 1
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    /// Looks at `max_features` random features, and keeps drawing past that
    /// budget only while no feature has produced a valid split.
    fn best_split(&self, indices: &[usize], rng: &mut StdRng) -> Option<Split> {
        let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
        features.shuffle(rng);

        let mut best: Option<Split> = None;
        for (visited, &feature) in features.iter().enumerate() {
            if visited >= self.max_features && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_threshold(indices, feature) {
                if best.map_or(true, |current| candidate.impurity < current.impurity) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    fn best_threshold(&self, indices: &[usize], feature: usize) -> Option<Split> {
        let mut sorted = indices.to_vec();
        sorted.sort_by(|&a, &b| {
            self.samples[a][feature].total_cmp(&self.samples[b][feature])
        });

        let total = sorted.len();
        let mut right_counts = self.class_counts(&sorted);
        let mut left_counts = vec![0usize; self.n_classes];
        let mut best: Option<Split> = None;

        for position in 0..total.saturating_sub(1) {
            let label = self.labels[sorted[position]];
            left_counts[label] += 1;
            right_counts[label] -= 1;

            let current = self.samples[sorted[position]][feature];
            let next = self.samples[sorted[position + 1]][feature];
            if next <= current {
                continue;
            }

            let left_total = position + 1;
            let right_total = total - left_total;
            let impurity = (left_total as f64 * gini(&left_counts, left_total)
                + right_total as f64 * gini(&right_counts, right_total))
                / total as f64;

            if best.map_or(true, |current_best| impurity < current_best.impurity) {
                best = Some(Split {
                    feature,
                    threshold: (current + next) / 2.0,
                    impurity,
                });
            }
        }
        best
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&count| {
            let p = count as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Ensemble of decision trees; class probabilities are the mean of the
/// trees' leaf distributions.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    pub fn fit(
        samples: &[FeatureRow],
        labels: &[usize],
        n_classes: usize,
        config: &ForestConfig,
    ) -> Self {
        let n_samples = samples.len().min(labels.len());
        if n_samples == 0 || n_classes == 0 {
            return Self {
                trees: Vec::new(),
                n_classes,
            };
        }

        let max_features = ((FEATURE_COUNT as f64).sqrt().ceil() as usize).max(1);
        let mut rng = StdRng::seed_from_u64(config.seed);

        let trees = (0..config.n_trees.max(1))
            .map(|_| {
                let mut tree_rng = StdRng::seed_from_u64(rng.gen());
                let bootstrap: Vec<usize> = (0..n_samples)
                    .map(|_| tree_rng.gen_range(0..n_samples))
                    .collect();

                let mut builder = TreeBuilder {
                    samples,
                    labels,
                    n_classes,
                    max_features,
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split.max(2),
                    nodes: Vec::new(),
                };
                builder.build(bootstrap, 0, &mut tree_rng);
                DecisionTree {
                    nodes: builder.nodes,
                }
            })
            .collect();

        Self { trees, n_classes }
    }

    pub fn predict_proba(&self, row: &FeatureRow) -> Vec<f64> {
        let mut probabilities = vec![0.0; self.n_classes];
        if self.trees.is_empty() {
            return probabilities;
        }

        for tree in &self.trees {
            for (total, p) in probabilities.iter_mut().zip(tree.predict_proba(row)) {
                *total += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        for p in &mut probabilities {
            *p /= n_trees;
        }
        probabilities
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

/// Index of the largest probability; ties go to the lowest index.
pub fn argmax(probabilities: &[f64]) -> Option<usize> {
    probabilities
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, &p)| match best {
            Some((_, best_p)) if p <= best_p => best,
            _ => Some((index, p)),
        })
        .map(|(index, _)| index)
}
