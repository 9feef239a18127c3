//! Hungarian (Kuhn-Munkres) method for maximum-weight bipartite matching.
//!
//! Successive shortest augmenting paths with row/column potentials on the
//! padded square matrix, O(n³) for `n = max(drivers, riders)`. Costs are
//! arbitrary reals; negative savings simply lose to the zero-valued
//! "unmatched" cell.

use tracing::debug;

use crate::graph::BipartiteGraph;

use super::algorithm::MatchingAlgorithm;
use super::square::{canonicalize, Duals, SquareProblem};
use super::types::{Matching, Objective};

/// Exact maximum-weight matching where any participant may stay unmatched.
#[derive(Debug, Default, Clone, Copy)]
pub struct HungarianMatching;

impl MatchingAlgorithm for HungarianMatching {
    fn name(&self) -> &'static str {
        "hungarian"
    }

    fn objective(&self) -> Objective {
        Objective::MaximizeWeight
    }

    fn solve(&self, graph: &BipartiteGraph) -> Matching {
        if graph.is_degenerate() {
            return Matching::empty();
        }
        let problem = SquareProblem::new(graph, Objective::MaximizeWeight);
        let n = problem.size();
        let mut cost = vec![0.0; n * n];
        for row in 0..n {
            for col in 0..n {
                cost[row * n + col] = -problem.value(row, col);
            }
        }

        let (mut row_to_col, duals) = assign_min_cost(n, &cost);
        canonicalize(&problem, &duals, &mut row_to_col);

        let matching = Matching::from_positions(
            graph,
            Objective::MaximizeWeight,
            problem.positions(&row_to_col),
        );
        debug!(
            size = n,
            pairs = matching.len(),
            objective = matching.objective_value,
            "hungarian assignment solved"
        );
        matching
    }
}

/// Minimum-cost perfect assignment of a dense `n x n` row-major matrix.
///
/// Returns the column of every row and the duals in maximisation form
/// (`u[i] + v[j] >= -cost[i][j]`, tight on the assignment).
fn assign_min_cost(n: usize, cost: &[f64]) -> (Vec<usize>, Duals) {
    // 1-based with index 0 as the virtual source column.
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut owner = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];
    let mut min_slack = vec![f64::INFINITY; n + 1];
    let mut used = vec![false; n + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut col0 = 0;
        min_slack.iter_mut().for_each(|m| *m = f64::INFINITY);
        used.iter_mut().for_each(|flag| *flag = false);

        loop {
            used[col0] = true;
            let row0 = owner[col0];
            let mut delta = f64::INFINITY;
            let mut col1 = 0;
            for col in 1..=n {
                if used[col] {
                    continue;
                }
                let reduced = cost[(row0 - 1) * n + (col - 1)] - u[row0] - v[col];
                if reduced < min_slack[col] {
                    min_slack[col] = reduced;
                    way[col] = col0;
                }
                // Strict comparison keeps the lowest column on ties.
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    col1 = col;
                }
            }
            debug_assert!(col1 != 0, "no unused column left while augmenting");
            for col in 0..=n {
                if used[col] {
                    u[owner[col]] += delta;
                    v[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }
            col0 = col1;
            if owner[col0] == 0 {
                break;
            }
        }

        loop {
            let col1 = way[col0];
            owner[col0] = owner[col1];
            col0 = col1;
            if col0 == 0 {
                break;
            }
        }
    }

    let mut row_to_col = vec![0; n];
    for col in 1..=n {
        row_to_col[owner[col] - 1] = col - 1;
    }
    let duals = Duals {
        u: u[1..].iter().map(|x| -x).collect(),
        v: v[1..].iter().map(|x| -x).collect(),
    };
    (row_to_col, duals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_min_cost_permutation() {
        let cost = vec![
            4.0, 1.0, 3.0, //
            2.0, 0.0, 5.0, //
            3.0, 2.0, 2.0,
        ];
        let (row_to_col, duals) = assign_min_cost(3, &cost);
        let total: f64 = row_to_col.iter().enumerate().map(|(r, &c)| cost[r * 3 + c]).sum();
        assert_eq!(total, 5.0);
        for (row, &col) in row_to_col.iter().enumerate() {
            assert!((duals.u[row] + duals.v[col] + cost[row * 3 + col]).abs() < 1e-9);
        }
    }

    #[test]
    fn prefers_cross_pairing_over_greedy() {
        // Greedy would take (1, 10) = 10 and then (2, 20) = 1.
        let graph =
            BipartiteGraph::from_dense(&[1, 2], &[10, 20], &[vec![10.0, 9.0], vec![9.0, 1.0]]);
        let matching = HungarianMatching.solve(&graph);
        assert_eq!(matching.id_pairs(), vec![(1, 20), (2, 10)]);
        assert_eq!(matching.objective_value, 18.0);
    }

    #[test]
    fn negative_weights_stay_unmatched() {
        let graph = BipartiteGraph::from_dense(&[1, 2], &[10], &[vec![-3.0], vec![2.0]]);
        let matching = HungarianMatching.solve(&graph);
        assert_eq!(matching.id_pairs(), vec![(2, 10)]);

        let all_negative = BipartiteGraph::from_dense(&[1], &[10], &[vec![-0.5]]);
        assert!(HungarianMatching.solve(&all_negative).is_empty());
    }

    #[test]
    fn ties_resolve_to_smallest_ids() {
        let graph = BipartiteGraph::from_dense(
            &[3, 1, 2],
            &[30, 10, 20],
            &[vec![5.0; 3], vec![5.0; 3], vec![5.0; 3]],
        );
        let matching = HungarianMatching.solve(&graph);
        assert_eq!(matching.id_pairs(), vec![(1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn rectangular_more_riders() {
        let graph = BipartiteGraph::from_dense(&[1], &[10, 20, 30], &[vec![1.0, 7.0, 3.0]]);
        assert_eq!(HungarianMatching.solve(&graph).id_pairs(), vec![(1, 20)]);
    }

    #[test]
    fn pruned_edges_are_never_selected() {
        let graph = BipartiteGraph::from_weights(
            vec![crate::ParticipantId(1), crate::ParticipantId(2)],
            vec![crate::ParticipantId(10)],
            vec![vec![None], vec![Some(1.0)]],
        );
        assert_eq!(HungarianMatching.solve(&graph).id_pairs(), vec![(2, 10)]);
    }
}
