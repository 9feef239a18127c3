use std::cmp::Ordering;

use crate::graph::BipartiteGraph;

use super::algorithm::MatchingAlgorithm;
use super::square::SquareProblem;
use super::types::{Matching, Objective};

/// Greedy baseline: repeatedly takes the heaviest edge whose driver and rider
/// are both still free.
///
/// # Use Cases
///
/// - Baseline comparisons against the exact solvers
/// - Very large instances where O(n³) is too slow and a best-effort answer is
///   acceptable
///
/// Not optimal: a heavy edge taken early can block two good ones. Under
/// `MaximizeWeight` edges at or below the tie tolerance are skipped, as in
/// the exact solvers.
///
/// # Performance
///
/// O(E log E) for E feasible edges.
#[derive(Debug, Clone, Copy)]
pub struct GreedyMatching {
    objective: Objective,
}

impl GreedyMatching {
    pub fn new(objective: Objective) -> Self {
        Self { objective }
    }
}

impl Default for GreedyMatching {
    fn default() -> Self {
        Self::new(Objective::MaximizeWeight)
    }
}

impl MatchingAlgorithm for GreedyMatching {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn objective(&self) -> Objective {
        self.objective
    }

    fn solve(&self, graph: &BipartiteGraph) -> Matching {
        // Same reporting threshold as the exact solvers.
        let problem = SquareProblem::new(graph, self.objective);
        let mut edges: Vec<(usize, usize, f64)> = graph
            .edges()
            .filter(|&(row, col, _)| problem.reportable(row, col))
            .collect();
        // Heaviest first; row-major order on equal weight.
        edges.sort_by(|a, b| {
            b.2.partial_cmp(&a.2)
                .unwrap_or(Ordering::Equal)
                .then_with(|| (a.0, a.1).cmp(&(b.0, b.1)))
        });

        let mut driver_used = vec![false; graph.num_drivers()];
        let mut rider_used = vec![false; graph.num_riders()];
        let mut positions = Vec::new();
        for (row, col, _) in edges {
            if driver_used[row] || rider_used[col] {
                continue;
            }
            driver_used[row] = true;
            rider_used[col] = true;
            positions.push((row, col));
        }
        Matching::from_positions(graph, self.objective, positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_takes_heaviest_edge_first() {
        let graph =
            BipartiteGraph::from_dense(&[1, 2], &[10, 20], &[vec![10.0, 9.0], vec![9.0, 1.0]]);
        let matching = GreedyMatching::default().solve(&graph);
        assert_eq!(matching.id_pairs(), vec![(1, 10), (2, 20)]);
        assert_eq!(matching.objective_value, 11.0);
    }

    #[test]
    fn greedy_skips_sub_tolerance_edges_like_the_exact_solver() {
        // Tolerance is 1e-9 * 1e6 = 1e-3, so the 1e-4 edge counts as unmatched.
        let graph = BipartiteGraph::from_dense(
            &[1, 2],
            &[10, 20],
            &[vec![1e6, 0.0], vec![0.0, 1e-4]],
        );
        let greedy = GreedyMatching::default().solve(&graph);
        let exact = crate::matching::HungarianMatching.solve(&graph);
        assert_eq!(greedy.id_pairs(), vec![(1, 10)]);
        assert_eq!(greedy.id_pairs(), exact.id_pairs());
    }

    #[test]
    fn greedy_skips_negative_edges_when_weighting() {
        let graph = BipartiteGraph::from_dense(&[1], &[10], &[vec![-1.0]]);
        assert!(GreedyMatching::default().solve(&graph).is_empty());
        assert_eq!(
            GreedyMatching::new(Objective::MaximizeCount).solve(&graph).len(),
            1
        );
    }
}
