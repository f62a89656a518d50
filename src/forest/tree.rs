//! CART regression tree with variance-reduction splits
//!
//! Nodes live in a flat arena (indices instead of boxed children) so the
//! fitted tree serializes to plain JSON alongside the encoders.

use serde::{Deserialize, Serialize};

/// A node in the fitted tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Terminal node predicting the mean target of its training samples
    Leaf { value: f64 },
    /// Binary split: `feature <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Fit a tree over the sample rows selected by `indices`
    ///
    /// `indices` may repeat rows (bootstrap sampling). `x` rows and `y` must
    /// have equal length; callers validate before fitting.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        indices: &[usize],
        max_depth: usize,
        min_samples_leaf: usize,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        let mut indices = indices.to_vec();
        tree.build(x, y, &mut indices, 0, max_depth, min_samples_leaf);
        tree
    }

    /// Predict the target for one feature row
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut at = 0usize;
        loop {
            match &self.nodes[at] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Number of nodes in the fitted tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn build(
        &mut self,
        x: &[Vec<f64>],
        y: &[f64],
        indices: &mut [usize],
        depth: usize,
        max_depth: usize,
        min_samples_leaf: usize,
    ) -> usize {
        let mean = mean_of(y, indices);

        let split = if depth < max_depth && indices.len() >= 2 * min_samples_leaf {
            best_split(x, y, indices, min_samples_leaf)
        } else {
            None
        };

        let Some((feature, threshold)) = split else {
            self.nodes.push(Node::Leaf { value: mean });
            return self.nodes.len() - 1;
        };

        // Partition in place so the recursion works on contiguous slices.
        let pivot = partition(x, indices, feature, threshold);
        let at = self.nodes.len();
        self.nodes.push(Node::Split {
            feature,
            threshold,
            left: 0,
            right: 0,
        });

        let (left_idx, right_idx) = indices.split_at_mut(pivot);
        let left = self.build(x, y, left_idx, depth + 1, max_depth, min_samples_leaf);
        let right = self.build(x, y, right_idx, depth + 1, max_depth, min_samples_leaf);

        if let Node::Split {
            left: l, right: r, ..
        } = &mut self.nodes[at]
        {
            *l = left;
            *r = right;
        }
        at
    }
}

fn mean_of(y: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}

/// Move indices with `x[feature] <= threshold` to the front; return the count
fn partition(x: &[Vec<f64>], indices: &mut [usize], feature: usize, threshold: f64) -> usize {
    let mut pivot = 0usize;
    for i in 0..indices.len() {
        if x[indices[i]][feature] <= threshold {
            indices.swap(i, pivot);
            pivot += 1;
        }
    }
    pivot
}

/// Find the (feature, threshold) minimizing the summed squared error of the
/// two children, or None when no split improves on the parent
fn best_split(
    x: &[Vec<f64>],
    y: &[f64],
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<(usize, f64)> {
    let n = indices.len();
    let n_features = x.first().map_or(0, Vec::len);

    let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n as f64;
    if parent_sse <= f64::EPSILON {
        return None; // pure node
    }

    let mut best: Option<(usize, f64)> = None;
    let mut best_sse = parent_sse;

    let mut order: Vec<usize> = Vec::with_capacity(n);
    for feature in 0..n_features {
        order.clear();
        order.extend_from_slice(indices);
        order.sort_by(|&a, &b| {
            x[a][feature]
                .partial_cmp(&x[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for pos in 0..n - 1 {
            let yi = y[order[pos]];
            left_sum += yi;
            left_sq += yi * yi;

            let here = x[order[pos]][feature];
            let next = x[order[pos + 1]][feature];
            if here == next {
                continue; // can't split between equal values
            }
            let left_n = pos + 1;
            let right_n = n - left_n;
            if left_n < min_samples_leaf || right_n < min_samples_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / left_n as f64)
                + (right_sq - right_sum * right_sum / right_n as f64);

            if sse < best_sse - 1e-12 {
                best_sse = sse;
                best = Some((feature, (here + next) / 2.0));
            }
        }
    }
    best
}
