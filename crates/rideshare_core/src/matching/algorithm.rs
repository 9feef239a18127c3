use crate::graph::BipartiteGraph;

use super::types::{Matching, Objective};

/// Trait for algorithms that pair drivers with riders over a bipartite graph.
///
/// Implementations never fail on a well-formed graph: a graph with no
/// drivers or no riders yields the empty matching. Exact implementations
/// return the lexicographically smallest `(driver, rider)` matching among
/// those with the optimal objective value, so repeated runs agree.
///
/// # Examples
///
/// ```rust
/// use rideshare_core::graph::BipartiteGraph;
/// use rideshare_core::matching::{HungarianMatching, MatchingAlgorithm};
///
/// let graph = BipartiteGraph::from_dense(&[1, 2], &[10, 20], &[vec![5.0, 1.0], vec![4.0, 3.0]]);
/// let matching = HungarianMatching.solve(&graph);
/// assert_eq!(matching.id_pairs(), vec![(1, 10), (2, 20)]);
/// ```
pub trait MatchingAlgorithm: Send + Sync {
    /// Short name used in logs and exported results.
    fn name(&self) -> &'static str;

    /// The objective this algorithm optimises.
    fn objective(&self) -> Objective;

    /// Solve the assignment problem on `graph`.
    fn solve(&self, graph: &BipartiteGraph) -> Matching;
}
