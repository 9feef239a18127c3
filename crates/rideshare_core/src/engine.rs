//! Entry point: participants in, matching out.
//!
//! Validation runs before the weight matrix is built, so invalid input never
//! yields a partial result. An empty side is not an error: the outcome is the
//! empty matching with `degenerate` set.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SolveConfig;
use crate::error::MatchError;
use crate::graph::BipartiteGraph;
use crate::matching::{exact_algorithm, Matching, MatchingAlgorithm, Objective};
use crate::participant::Participant;
use crate::spatial::DistanceMetric;
use crate::weights::WeightStrategy;

/// A matching together with the run parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matching: Matching,
    pub objective: Objective,
    pub strategy: WeightStrategy,
    /// Distance metric used for every weight in this run.
    pub metric: DistanceMetric,
    pub algorithm: String,
    pub drivers: usize,
    pub riders: usize,
    /// Set when there were no drivers or no riders.
    pub degenerate: bool,
}

/// Solves one run with the exact algorithm for `config.objective`.
pub fn solve(
    drivers: &[Participant],
    riders: &[Participant],
    config: &SolveConfig,
) -> Result<MatchOutcome, MatchError> {
    let graph = config.graph_builder().build(drivers, riders)?;
    let algorithm = exact_algorithm(config.objective);
    Ok(solve_with(algorithm.as_ref(), &graph, config))
}

/// Runs `algorithm` on an already built graph.
pub fn solve_with(
    algorithm: &dyn MatchingAlgorithm,
    graph: &BipartiteGraph,
    config: &SolveConfig,
) -> MatchOutcome {
    let degenerate = graph.is_degenerate();
    let matching = if degenerate {
        warn!(
            drivers = graph.num_drivers(),
            riders = graph.num_riders(),
            "no drivers or no riders; returning the empty matching"
        );
        Matching::empty()
    } else {
        algorithm.solve(graph)
    };

    info!(
        algorithm = algorithm.name(),
        objective = %algorithm.objective(),
        strategy = %config.strategy,
        metric = %config.metric,
        pairs = matching.len(),
        objective_value = matching.objective_value,
        "matching solved"
    );

    MatchOutcome {
        matching,
        objective: algorithm.objective(),
        strategy: config.strategy,
        metric: config.metric,
        algorithm: algorithm.name().to_string(),
        drivers: graph.num_drivers(),
        riders: graph.num_riders(),
        degenerate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::GreedyMatching;
    use crate::participant::GeoPoint;

    #[test]
    fn degenerate_input_is_not_an_error() {
        let drivers = vec![Participant::driver(
            1,
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            1.0,
        )];
        let outcome = solve(&drivers, &[], &SolveConfig::default()).expect("solve");
        assert!(outcome.degenerate);
        assert!(outcome.matching.is_empty());
        assert_eq!(outcome.matching.objective_value, 0.0);
    }

    #[test]
    fn invalid_input_is_rejected_even_when_other_side_is_empty() {
        let drivers = vec![Participant::driver(
            1,
            GeoPoint::new(0.0, 200.0),
            GeoPoint::new(1.0, 0.0),
            1.0,
        )];
        assert!(solve(&drivers, &[], &SolveConfig::default()).is_err());
    }

    #[test]
    fn solve_with_reports_algorithm() {
        let graph = BipartiteGraph::from_dense(&[1], &[2], &[vec![1.0]]);
        let outcome = solve_with(&GreedyMatching::default(), &graph, &SolveConfig::default());
        assert_eq!(outcome.algorithm, "greedy");
        assert_eq!(outcome.matching.len(), 1);
    }
}
