//! Regression forest over encoded task features.
//!
//! The scheduler's model is an ensemble of CART regression trees fit on
//! bootstrap resamples of the training rows, predicting the mean of the
//! per-tree predictions. The corpus of historical tasks is tiny (tens of
//! rows), so the implementation favors clarity over vectorized speed: exact
//! best-split search by within-node variance, no pruning, unlimited depth by
//! default.
//!
//! Trees are plain serde structs so a fitted forest can be persisted as an
//! opaque artifact and reloaded by a later process invocation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Hyperparameters for [`RandomForestRegressor::fit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of bootstrap trees in the ensemble.
    pub trees: usize,
    /// Minimum samples required to split an internal node.
    pub min_samples_split: usize,
    /// Optional depth cap; `None` grows each tree until its leaves are pure.
    pub max_depth: Option<usize>,
    /// Optional RNG seed for reproducible fits.
    pub seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            min_samples_split: 2,
            max_depth: None,
            seed: None,
        }
    }
}

/// One node of a fitted regression tree, stored in an index arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single CART regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegressionTree {
    nodes: Vec<Node>,
    root: usize,
}

impl RegressionTree {
    fn fit(samples: &[Vec<f64>], targets: &[f64], indices: Vec<usize>, config: &ForestConfig) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: 0,
        };
        tree.root = tree.grow(samples, targets, indices, 0, config);
        tree
    }

    /// Grow a subtree over `indices`, returning its node index.
    fn grow(
        &mut self,
        samples: &[Vec<f64>],
        targets: &[f64],
        indices: Vec<usize>,
        depth: usize,
        config: &ForestConfig,
    ) -> usize {
        let mean = indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64;

        let at_depth_cap = config.max_depth.is_some_and(|cap| depth >= cap);
        if indices.len() < config.min_samples_split || at_depth_cap {
            return self.push(Node::Leaf { value: mean });
        }

        let Some((feature, threshold)) = best_split(samples, targets, &indices) else {
            // No split reduces variance (constant targets or features).
            return self.push(Node::Leaf { value: mean });
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| samples[i][feature] <= threshold);
        if left_indices.is_empty() || right_indices.is_empty() {
            return self.push(Node::Leaf { value: mean });
        }

        let left = self.grow(samples, targets, left_indices, depth + 1, config);
        let right = self.grow(samples, targets, right_indices, depth + 1, config);
        self.push(Node::Split {
            feature,
            threshold,
            left,
            right,
        })
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let mut current = self.root;
        loop {
            match &self.nodes[current] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    current = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Exhaustive best-split search: every feature, every threshold between
/// adjacent distinct values, scored by summed within-child variance.
fn best_split(samples: &[Vec<f64>], targets: &[f64], indices: &[usize]) -> Option<(usize, f64)> {
    let feature_count = samples[indices[0]].len();
    let total: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();
    let n = indices.len() as f64;
    let parent_sse = total_sq - total * total / n;

    let mut best: Option<(f64, usize, f64)> = None;
    for feature in 0..feature_count {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| samples[a][feature].total_cmp(&samples[b][feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for (position, &index) in order.iter().enumerate().take(order.len() - 1) {
            left_sum += targets[index];
            left_sq += targets[index] * targets[index];

            let here = samples[index][feature];
            let next = samples[order[position + 1]][feature];
            if here == next {
                continue;
            }

            let left_n = (position + 1) as f64;
            let right_n = n - left_n;
            let right_sum = total - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);
            if best.is_none_or(|(best_sse, _, _)| sse < best_sse) {
                best = Some((sse, feature, (here + next) / 2.0));
            }
        }
    }

    // Splitting must actually reduce the node's error; the epsilon absorbs
    // the float noise of the prefix-sum arithmetic.
    best.filter(|&(sse, _, _)| sse < parent_sse - 1e-9)
        .map(|(_, feature, threshold)| (feature, threshold))
}

/// Ensemble of bootstrap regression trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
    feature_count: usize,
}

impl RandomForestRegressor {
    /// Fit a forest against real-valued targets.
    ///
    /// Every tree sees a bootstrap resample (same size, drawn with
    /// replacement) of the rows. All features are considered at every split.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty or its length differs from `targets`;
    /// the training pipeline guards both before calling.
    pub fn fit(samples: &[Vec<f64>], targets: &[f64], config: &ForestConfig) -> Self {
        assert!(!samples.is_empty(), "fit requires at least one sample");
        assert_eq!(samples.len(), targets.len(), "samples/targets length mismatch");

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let n = samples.len();
        let trees = (0..config.trees.max(1))
            .map(|_| {
                let indices: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                RegressionTree::fit(samples, targets, indices, config)
            })
            .collect();

        Self {
            trees,
            feature_count: samples[0].len(),
        }
    }

    /// Predict one target value: the mean over all trees.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Number of features the forest was fit on.
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(trees: usize) -> ForestConfig {
        ForestConfig {
            trees,
            seed: Some(42),
            ..ForestConfig::default()
        }
    }

    #[test]
    fn constant_targets_predict_the_constant() {
        let samples = vec![vec![0.0], vec![1.0], vec![2.0]];
        let targets = vec![540.0, 540.0, 540.0];
        let forest = RandomForestRegressor::fit(&samples, &targets, &seeded(25));
        assert!((forest.predict(&[1.0]) - 540.0).abs() < 1e-9);
        assert!((forest.predict(&[7.0]) - 540.0).abs() < 1e-9);
    }

    #[test]
    fn single_sample_fits_and_predicts() {
        let forest = RandomForestRegressor::fit(&[vec![3.0]], &[600.0], &seeded(10));
        assert!((forest.predict(&[3.0]) - 600.0).abs() < 1e-9);
    }

    #[test]
    fn separable_groups_pull_predictions_apart() {
        let samples = vec![
            vec![0.0],
            vec![0.0],
            vec![0.0],
            vec![1.0],
            vec![1.0],
            vec![1.0],
        ];
        let targets = vec![100.0, 100.0, 100.0, 200.0, 200.0, 200.0];
        let forest = RandomForestRegressor::fit(&samples, &targets, &seeded(100));

        let low = forest.predict(&[0.0]);
        let high = forest.predict(&[1.0]);
        assert!((100.0..=200.0).contains(&low));
        assert!((100.0..=200.0).contains(&high));
        assert!(low < 150.0, "group 0 prediction drifted to {low}");
        assert!(high > 150.0, "group 1 prediction drifted to {high}");
    }

    #[test]
    fn predictions_stay_in_observed_target_range() {
        let samples = vec![vec![0.0], vec![0.0], vec![1.0], vec![2.0]];
        let targets = vec![1140.0, 1145.0, 1260.0, 420.0];
        let forest = RandomForestRegressor::fit(&samples, &targets, &seeded(100));
        for code in 0..3 {
            let predicted = forest.predict(&[f64::from(code)]);
            assert!((420.0..=1260.0).contains(&predicted), "prediction {predicted}");
        }
    }

    #[test]
    fn depth_cap_still_produces_a_usable_tree() {
        let config = ForestConfig {
            max_depth: Some(1),
            ..seeded(10)
        };
        let samples = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let targets = vec![10.0, 20.0, 30.0, 40.0];
        let forest = RandomForestRegressor::fit(&samples, &targets, &config);
        let predicted = forest.predict(&[0.0]);
        assert!((10.0..=40.0).contains(&predicted));
    }

    #[test]
    fn seeded_fits_are_reproducible() {
        let samples = vec![vec![0.0], vec![1.0], vec![2.0]];
        let targets = vec![60.0, 120.0, 180.0];
        let first = RandomForestRegressor::fit(&samples, &targets, &seeded(50));
        let second = RandomForestRegressor::fit(&samples, &targets, &seeded(50));
        for code in 0..3 {
            let features = [f64::from(code)];
            assert!((first.predict(&features) - second.predict(&features)).abs() < 1e-12);
        }
    }

    #[test]
    fn survives_codec_round_trip() {
        let samples = vec![vec![0.0, 19.0], vec![1.0, 21.0], vec![0.0, 19.0]];
        let targets = vec![1140.0, 1260.0, 1145.0];
        let forest = RandomForestRegressor::fit(&samples, &targets, &seeded(30));

        let bytes = bincode::serialize(&forest).unwrap();
        let restored: RandomForestRegressor = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored.feature_count(), 2);
        let features = [0.0, 19.0];
        assert!((forest.predict(&features) - restored.predict(&features)).abs() < 1e-12);
    }
}
