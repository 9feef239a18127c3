//! Maximum-cardinality matching by augmenting paths (Kuhn's algorithm).
//!
//! Drivers are processed in id order and each tries riders in id order, so
//! the search is deterministic. A König vertex cover of the result supplies
//! 0/1 dual potentials, which lets the shared canonical pass pick the
//! lexicographically smallest maximum matching.

use tracing::debug;

use crate::graph::BipartiteGraph;

use super::algorithm::MatchingAlgorithm;
use super::square::{canonicalize, Duals, SquareProblem};
use super::types::{Matching, Objective};

#[derive(Debug, Default, Clone, Copy)]
pub struct AugmentingPathMatching;

impl MatchingAlgorithm for AugmentingPathMatching {
    fn name(&self) -> &'static str {
        "augmenting_path"
    }

    fn objective(&self) -> Objective {
        Objective::MaximizeCount
    }

    fn solve(&self, graph: &BipartiteGraph) -> Matching {
        if graph.is_degenerate() {
            return Matching::empty();
        }
        let drivers = graph.num_drivers();
        let riders = graph.num_riders();

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); drivers];
        for (row, col, _) in graph.edges() {
            adjacency[row].push(col);
        }

        let mut rider_owner: Vec<Option<usize>> = vec![None; riders];
        let mut visited = vec![false; riders];
        for driver in 0..drivers {
            visited.iter_mut().for_each(|flag| *flag = false);
            try_augment(driver, &adjacency, &mut visited, &mut rider_owner);
        }

        let mut driver_match: Vec<Option<usize>> = vec![None; drivers];
        for (col, owner) in rider_owner.iter().enumerate() {
            if let Some(row) = owner {
                driver_match[*row] = Some(col);
            }
        }

        let problem = SquareProblem::new(graph, Objective::MaximizeCount);
        let duals = konig_duals(&problem, &adjacency, &driver_match, &rider_owner);
        let mut row_to_col = complete_assignment(problem.size(), &driver_match, &rider_owner);
        canonicalize(&problem, &duals, &mut row_to_col);

        let matching = Matching::from_positions(
            graph,
            Objective::MaximizeCount,
            problem.positions(&row_to_col),
        );
        debug!(pairs = matching.len(), "augmenting path matching solved");
        matching
    }
}

fn try_augment(
    driver: usize,
    adjacency: &[Vec<usize>],
    visited: &mut [bool],
    rider_owner: &mut [Option<usize>],
) -> bool {
    for &rider in &adjacency[driver] {
        if visited[rider] {
            continue;
        }
        visited[rider] = true;
        let free = match rider_owner[rider] {
            None => true,
            Some(other) => try_augment(other, adjacency, visited, rider_owner),
        };
        if free {
            rider_owner[rider] = Some(driver);
            return true;
        }
    }
    false
}

/// Potentials from a minimum vertex cover: 1 on covered real vertices, 0
/// elsewhere. Covered drivers are those not reachable by alternating paths
/// from an unmatched driver; covered riders are those that are reachable.
fn konig_duals(
    problem: &SquareProblem<'_>,
    adjacency: &[Vec<usize>],
    driver_match: &[Option<usize>],
    rider_owner: &[Option<usize>],
) -> Duals {
    let n = problem.size();
    let mut driver_reached = vec![false; adjacency.len()];
    let mut rider_reached = vec![false; rider_owner.len()];
    let mut stack: Vec<usize> = (0..adjacency.len())
        .filter(|&row| driver_match[row].is_none())
        .collect();
    for &row in &stack {
        driver_reached[row] = true;
    }
    while let Some(row) = stack.pop() {
        for &col in &adjacency[row] {
            if rider_reached[col] {
                continue;
            }
            rider_reached[col] = true;
            if let Some(owner) = rider_owner[col] {
                if !driver_reached[owner] {
                    driver_reached[owner] = true;
                    stack.push(owner);
                }
            }
        }
    }

    let mut u = vec![0.0; n];
    let mut v = vec![0.0; n];
    for (row, reached) in driver_reached.iter().enumerate() {
        if !reached {
            u[row] = 1.0;
        }
    }
    for (col, reached) in rider_reached.iter().enumerate() {
        if *reached {
            v[col] = 1.0;
        }
    }
    Duals { u, v }
}

/// Extends a partial matching to a perfect square assignment by pairing the
/// leftover rows and columns in index order.
fn complete_assignment(
    n: usize,
    driver_match: &[Option<usize>],
    rider_owner: &[Option<usize>],
) -> Vec<usize> {
    let mut row_to_col: Vec<Option<usize>> = (0..n)
        .map(|row| driver_match.get(row).copied().flatten())
        .collect();
    let mut free_cols = (0..n).filter(|&col| rider_owner.get(col).copied().flatten().is_none());
    for slot in row_to_col.iter_mut().filter(|slot| slot.is_none()) {
        *slot = free_cols.next();
    }
    row_to_col
        .into_iter()
        .map(|col| col.unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::ParticipantId;

    fn sparse(drivers: &[u64], riders: &[u64], edges: &[(usize, usize)]) -> BipartiteGraph {
        let mut weights = vec![vec![None; riders.len()]; drivers.len()];
        for &(row, col) in edges {
            weights[row][col] = Some(1.0);
        }
        BipartiteGraph::from_weights(
            drivers.iter().copied().map(ParticipantId).collect(),
            riders.iter().copied().map(ParticipantId).collect(),
            weights,
        )
    }

    #[test]
    fn augments_through_matched_rider() {
        // Driver 1 grabs rider 10 first; driver 2 only reaches rider 10.
        let graph = sparse(&[1, 2], &[10, 20], &[(0, 0), (0, 1), (1, 0)]);
        let matching = AugmentingPathMatching.solve(&graph);
        assert_eq!(matching.id_pairs(), vec![(1, 20), (2, 10)]);
        assert_eq!(matching.objective_value, 2.0);
    }

    #[test]
    fn forced_match_ignores_negative_weight() {
        let graph = BipartiteGraph::from_dense(&[1], &[100], &[vec![-4.0]]);
        let matching = AugmentingPathMatching.solve(&graph);
        assert_eq!(matching.id_pairs(), vec![(1, 100)]);
        assert_eq!(matching.objective_value, 1.0);
        assert_eq!(matching.total_weight, -4.0);
    }

    #[test]
    fn smallest_rider_wins_among_maximum_matchings() {
        // Only one rider can be matched; both are reachable from driver 1.
        let graph = sparse(&[1], &[10, 20], &[(0, 1), (0, 0)]);
        assert_eq!(AugmentingPathMatching.solve(&graph).id_pairs(), vec![(1, 10)]);
    }

    #[test]
    fn earlier_driver_stays_unmatched_only_when_required() {
        // Drivers 1 and 2 both only reach rider 10; driver 1 gets it.
        let graph = sparse(&[1, 2, 3], &[10, 20], &[(0, 0), (1, 0), (2, 1)]);
        assert_eq!(
            AugmentingPathMatching.solve(&graph).id_pairs(),
            vec![(1, 10), (3, 20)]
        );
    }

    #[test]
    fn no_edges_no_pairs() {
        let graph = sparse(&[1, 2], &[10], &[]);
        assert!(AugmentingPathMatching.solve(&graph).is_empty());
    }
}
