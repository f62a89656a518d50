//! Seeded random-forest regressor
//!
//! Bootstrap-aggregated regression trees over the three training features
//! (encoded hostel, encoded ingredient, students present). Tree count and
//! random seed are configuration, not hidden constants; the same
//! [`ForestConfig`] and training set always reproduce the same forest.

mod tree;

pub use tree::{Node, RegressionTree};

use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Random-forest hyperparameters with documented defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble (default 100)
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    /// Seed for bootstrap sampling (default 42)
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Maximum tree depth (default 12)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Minimum samples per leaf (default 1)
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
}

fn default_n_trees() -> usize {
    100
}
fn default_seed() -> u64 {
    42
}
fn default_max_depth() -> usize {
    12
}
fn default_min_samples_leaf() -> usize {
    1
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: default_n_trees(),
            seed: default_seed(),
            max_depth: default_max_depth(),
            min_samples_leaf: default_min_samples_leaf(),
        }
    }
}

/// A fitted random-forest regressor; immutable after fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    config: ForestConfig,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    /// Fit the forest over feature rows `x` and targets `y`
    pub fn fit(x: &[Vec<f64>], y: &[f64], config: &ForestConfig) -> Result<Self> {
        if x.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if x.len() != y.len() {
            return Err(Error::Config(format!(
                "feature/target length mismatch: {} rows vs {} targets",
                x.len(),
                y.len()
            )));
        }
        if config.n_trees == 0 {
            return Err(Error::Config("n_trees must be at least 1".to_string()));
        }

        let n = x.len();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);
        let mut sample = vec![0usize; n];

        for _ in 0..config.n_trees {
            for slot in sample.iter_mut() {
                *slot = rng.gen_range(0..n);
            }
            trees.push(RegressionTree::fit(
                x,
                y,
                &sample,
                config.max_depth,
                config.min_samples_leaf,
            ));
        }

        Ok(Self {
            config: *config,
            n_features: x[0].len(),
            trees,
        })
    }

    /// Predict one target as the mean of the per-tree predictions
    pub fn predict(&self, features: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Mean squared error over a labeled set
    pub fn mse(&self, x: &[Vec<f64>], y: &[f64]) -> f64 {
        if x.is_empty() {
            return 0.0;
        }
        let sum: f64 = x
            .iter()
            .zip(y)
            .map(|(row, &target)| {
                let err = self.predict(row) - target;
                err * err
            })
            .sum();
        sum / x.len() as f64
    }

    /// The configuration the forest was fit with
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Number of features per row expected by [`Self::predict`]
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(n_trees: usize, seed: u64) -> ForestConfig {
        ForestConfig {
            n_trees,
            seed,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn test_constant_target_predicts_exactly() {
        let x = vec![vec![0.0, 1.0, 100.0]; 4];
        let y = vec![0.5; 4];
        let forest = RandomForestRegressor::fit(&x, &y, &config(25, 42)).unwrap();
        assert_relative_eq!(forest.predict(&[0.0, 1.0, 100.0]), 0.5);
        assert_relative_eq!(forest.mse(&x, &y), 0.0);
    }

    #[test]
    fn test_two_cluster_regression() {
        // Two well-separated clusters, each duplicated so nearly every
        // bootstrap sample sees both.
        let mut x = Vec::new();
        let mut y = Vec::new();
        for _ in 0..8 {
            x.push(vec![0.0]);
            y.push(1.0);
            x.push(vec![10.0]);
            y.push(5.0);
        }
        let forest = RandomForestRegressor::fit(&x, &y, &config(50, 7)).unwrap();
        assert_relative_eq!(forest.predict(&[0.0]), 1.0, epsilon = 0.2);
        assert_relative_eq!(forest.predict(&[10.0]), 5.0, epsilon = 0.2);
    }

    #[test]
    fn test_same_seed_reproduces_forest() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        let a = RandomForestRegressor::fit(&x, &y, &config(10, 42)).unwrap();
        let b = RandomForestRegressor::fit(&x, &y, &config(10, 42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = RandomForestRegressor::fit(&[], &[], &ForestConfig::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let x = vec![vec![0.0]];
        let y = vec![1.0, 2.0];
        assert!(RandomForestRegressor::fit(&x, &y, &ForestConfig::default()).is_err());
    }

    #[test]
    fn test_zero_trees_is_rejected() {
        let x = vec![vec![0.0]];
        let y = vec![1.0];
        let err = RandomForestRegressor::fit(&x, &y, &config(0, 42)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_defaults() {
        let cfg = ForestConfig::default();
        assert_eq!(cfg.n_trees, 100);
        assert_eq!(cfg.seed, 42);
    }

    #[test]
    fn test_config_serde_fills_defaults() {
        let cfg: ForestConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ForestConfig::default());
        let cfg: ForestConfig = serde_json::from_str(r#"{"n_trees": 5}"#).unwrap();
        assert_eq!(cfg.n_trees, 5);
        assert_eq!(cfg.seed, 42);
    }

    #[test]
    fn test_serde_round_trip() {
        let x = vec![vec![0.0], vec![10.0]];
        let y = vec![1.0, 5.0];
        let forest = RandomForestRegressor::fit(&x, &y, &config(5, 42)).unwrap();
        let json = serde_json::to_string(&forest).unwrap();
        let back: RandomForestRegressor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, forest);
        assert_relative_eq!(back.predict(&[0.0]), forest.predict(&[0.0]));
    }
}
