//! Pairwise overlap between predictions.
//!
//! Two predictions overlap when their time windows intersect and their disks
//! do. The overlap graph is the input to independent-set resampling.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::domain::Prediction;

/// Undirected overlap relation between predictions.
///
/// Predictions `i` and `j` (`i != j`) are adjacent when their time windows
/// overlap and their disks intersect. Every prediction is considered to
/// conflict with itself, so [`OverlapGraph::is_adjacent`] returns `true` for
/// `i == j` even though self-loops are not stored in the neighbor lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapGraph {
    neighbors: Vec<Vec<usize>>,
}

impl OverlapGraph {
    /// Builds the graph by checking every unordered pair.
    ///
    /// Quadratic in the number of predictions, which is fine for the few
    /// thousand a forecast set holds.
    pub fn build(predictions: &[Prediction]) -> Self {
        let n = predictions.len();
        let mut neighbors = vec![Vec::new(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                if conflicts(&predictions[i], &predictions[j]) {
                    neighbors[i].push(j);
                    neighbors[j].push(i);
                }
            }
        }

        let graph = Self { neighbors };
        debug!(
            "Overlap graph: {} predictions, {} overlapping pairs",
            n,
            graph.edge_count()
        );
        graph
    }

    /// Builds a graph from explicit edges; out-of-range and self edges are
    /// ignored, duplicates collapsed.
    pub fn from_edges(len: usize, edges: &[(usize, usize)]) -> Self {
        let mut neighbors = vec![Vec::new(); len];
        for &(i, j) in edges {
            if i == j || i >= len || j >= len {
                continue;
            }
            if !neighbors[i].contains(&j) {
                neighbors[i].push(j);
                neighbors[j].push(i);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }
        Self { neighbors }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Overlapping predictions of `index`, ascending, excluding `index` itself.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    pub fn degree(&self, index: usize) -> usize {
        self.neighbors[index].len()
    }

    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        i == j || self.neighbors[i].binary_search(&j).is_ok()
    }

    /// Number of distinct overlapping pairs.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }
}

/// Two predictions conflict when they share time and space.
pub fn conflicts(a: &Prediction, b: &Prediction) -> bool {
    // time test first, it is cheaper than the haversine
    a.overlaps_in_time(b) && a.overlaps_in_space(b)
}
