//! Randomized maximal independent sets over the overlap graph.
//!
//! Overlapping predictions are not independent trials, so skill is measured
//! on many random subsets in which no two members overlap. Each subset is
//! built greedily: pick an eligible prediction uniformly at random, keep it,
//! and retire it together with everything it overlaps, until nothing is
//! eligible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::conflicts::OverlapGraph;

/// Generator for resample `index` under the base `seed`.
///
/// Each resample owns its stream, so the draws do not depend on evaluation
/// order or on how many threads run them.
pub fn sample_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(index as u64))
}

/// Draws one maximal independent set.
///
/// # Returns
/// Prediction indices in selection order. Isolated predictions are always
/// included; a complete graph yields a single index. Runs in time linear in
/// vertices plus edges.
pub fn sample_independent_set<R: Rng + ?Sized>(graph: &OverlapGraph, rng: &mut R) -> Vec<usize> {
    let mut selected = Vec::new();
    let mut eligible = EligibleSet::full(graph.len());

    while !eligible.is_empty() {
        let pick = eligible.get(rng.gen_range(0..eligible.len()));
        selected.push(pick);

        eligible.remove(pick);
        for &neighbor in graph.neighbors(pick) {
            eligible.remove(neighbor);
        }
    }

    selected
}

/// Unordered set of vertex indices with O(1) removal.
struct EligibleSet {
    members: Vec<usize>,
    /// Slot of each vertex in `members`, `None` once removed.
    slots: Vec<Option<usize>>,
}

impl EligibleSet {
    fn full(len: usize) -> Self {
        Self {
            members: (0..len).collect(),
            slots: (0..len).map(Some).collect(),
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn get(&self, slot: usize) -> usize {
        self.members[slot]
    }

    fn remove(&mut self, vertex: usize) {
        let Some(slot) = self.slots[vertex].take() else {
            return;
        };
        self.members.swap_remove(slot);
        if let Some(&moved) = self.members.get(slot) {
            self.slots[moved] = Some(slot);
        }
    }
}

/// Draws `count` independent sets, resample `k` seeded by [`sample_rng`].
pub fn draw_independent_sets(graph: &OverlapGraph, count: usize, seed: u64) -> Vec<Vec<usize>> {
    (0..count)
        .map(|k| sample_independent_set(graph, &mut sample_rng(seed, k)))
        .collect()
}
