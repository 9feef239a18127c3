//! Square assignment form shared by the exact solvers.
//!
//! The `D x R` graph is padded to `n = max(D, R)`. Every cell that is not a
//! reportable pair (dummy row or column, pruned edge, or a weight that is not
//! worth taking) has value zero, which is how "leave unmatched" enters the
//! assignment without special cases in the solver loops.
//!
//! Both solvers hand back an optimal perfect assignment together with dual
//! potentials `u`, `v` with `u[i] + v[j] >= value(i, j)`. The optimal
//! assignments are exactly the perfect matchings on tight cells, which
//! [`canonicalize`] uses to pick the lexicographically smallest one.

use std::collections::VecDeque;

use crate::graph::BipartiteGraph;

use super::types::Objective;

/// Absolute tie tolerance, scaled by the largest edge weight.
pub const TIE_EPSILON: f64 = 1e-9;

pub(crate) struct SquareProblem<'a> {
    graph: &'a BipartiteGraph,
    objective: Objective,
    n: usize,
    eps: f64,
}

impl<'a> SquareProblem<'a> {
    pub(crate) fn new(graph: &'a BipartiteGraph, objective: Objective) -> Self {
        Self {
            graph,
            objective,
            n: graph.num_drivers().max(graph.num_riders()),
            eps: TIE_EPSILON * graph.weight_scale(),
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.n
    }

    pub(crate) fn eps(&self) -> f64 {
        self.eps
    }

    pub(crate) fn drivers(&self) -> usize {
        self.graph.num_drivers()
    }

    pub(crate) fn riders(&self) -> usize {
        self.graph.num_riders()
    }

    /// True when `(row, col)` would be reported as a matched pair.
    pub(crate) fn reportable(&self, row: usize, col: usize) -> bool {
        if row >= self.drivers() || col >= self.riders() {
            return false;
        }
        match (self.graph.weight(row, col), self.objective) {
            (None, _) => false,
            (Some(_), Objective::MaximizeCount) => true,
            (Some(w), Objective::MaximizeWeight) => w > self.eps,
        }
    }

    pub(crate) fn value(&self, row: usize, col: usize) -> f64 {
        if !self.reportable(row, col) {
            return 0.0;
        }
        match self.objective {
            Objective::MaximizeCount => 1.0,
            Objective::MaximizeWeight => self.graph.weight(row, col).unwrap_or(0.0),
        }
    }

    /// Reportable `(row, col)` positions of a square assignment.
    pub(crate) fn positions<'s>(
        &'s self,
        row_to_col: &'s [usize],
    ) -> impl Iterator<Item = (usize, usize)> + 's {
        row_to_col
            .iter()
            .enumerate()
            .filter(|&(row, &col)| self.reportable(row, col))
            .map(|(row, &col)| (row, col))
    }
}

/// Dual potentials in maximisation form.
pub(crate) struct Duals {
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RowState {
    Free,
    Fixed,
    /// Already decided to stay unmatched; may only move between cells that
    /// are not reportable pairs.
    Unmatched,
}

/// Rewrites `row_to_col` into the lexicographically smallest optimal
/// assignment: drivers in id order each take the smallest-id rider that some
/// optimal assignment (consistent with earlier drivers) gives them, and stay
/// unmatched only when none does.
pub(crate) fn canonicalize(problem: &SquareProblem<'_>, duals: &Duals, row_to_col: &mut [usize]) {
    let n = problem.size();
    let eps = problem.eps();
    let tight = |row: usize, col: usize| {
        (duals.u[row] + duals.v[col] - problem.value(row, col)).abs() <= eps
    };

    let mut state = vec![RowState::Free; n];

    let mut in_reach = vec![false; n];
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; n];
    let mut queue = VecDeque::with_capacity(n);

    for driver in 0..problem.drivers() {
        let target = row_to_col[driver];
        in_reach.iter_mut().for_each(|flag| *flag = false);
        parent.iter_mut().for_each(|p| *p = None);
        queue.clear();

        // Columns from which a chain of moves ends on `target`: the owner of
        // column x steps to some column y already in reach.
        in_reach[target] = true;
        queue.push_back(target);
        while let Some(y) = queue.pop_front() {
            for row in 0..n {
                if row == driver {
                    continue;
                }
                let x = row_to_col[row];
                if in_reach[x] {
                    continue;
                }
                let may_move = match state[row] {
                    RowState::Fixed => false,
                    RowState::Free => tight(row, y),
                    RowState::Unmatched => tight(row, y) && !problem.reportable(row, y),
                };
                if may_move {
                    in_reach[x] = true;
                    parent[x] = Some((row, y));
                    queue.push_back(x);
                }
            }
        }

        let choice = (0..problem.riders())
            .find(|&col| in_reach[col] && problem.reportable(driver, col) && tight(driver, col));

        match choice {
            Some(col) => {
                let mut cur = col;
                while cur != target {
                    let Some((row, next)) = parent[cur] else {
                        unreachable!("column {cur} in reach without a parent");
                    };
                    row_to_col[row] = next;
                    cur = next;
                }
                row_to_col[driver] = col;
                state[driver] = RowState::Fixed;
            }
            None => state[driver] = RowState::Unmatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_larger_side() {
        let graph =
            BipartiteGraph::from_dense(&[1, 2, 3], &[10], &[vec![1.0], vec![2.0], vec![3.0]]);
        let problem = SquareProblem::new(&graph, Objective::MaximizeWeight);
        assert_eq!(problem.size(), 3);
        assert_eq!(problem.value(2, 0), 3.0);
        assert_eq!(problem.value(2, 2), 0.0);
        assert!(!problem.reportable(0, 1));
    }

    #[test]
    fn non_positive_weights_are_not_reportable_when_maximizing_weight() {
        let graph = BipartiteGraph::from_dense(&[1], &[10, 20], &[vec![-2.0, 0.0]]);
        let weighted = SquareProblem::new(&graph, Objective::MaximizeWeight);
        assert!(!weighted.reportable(0, 0));
        assert!(!weighted.reportable(0, 1));
        let counted = SquareProblem::new(&graph, Objective::MaximizeCount);
        assert!(counted.reportable(0, 0));
        assert_eq!(counted.value(0, 0), 1.0);
    }

    #[test]
    fn canonical_pass_moves_to_smallest_tight_rider() {
        // Every assignment scores 2; the identity permutation is smallest.
        let graph =
            BipartiteGraph::from_dense(&[1, 2], &[10, 20], &[vec![1.0, 1.0], vec![1.0, 1.0]]);
        let problem = SquareProblem::new(&graph, Objective::MaximizeWeight);
        let duals = Duals {
            u: vec![1.0, 1.0],
            v: vec![0.0, 0.0],
        };
        let mut row_to_col = vec![1, 0];
        canonicalize(&problem, &duals, &mut row_to_col);
        assert_eq!(row_to_col, vec![0, 1]);
    }
}
