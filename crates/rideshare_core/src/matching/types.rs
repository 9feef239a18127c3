use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::BipartiteGraph;
use crate::participant::ParticipantId;

/// What the solver optimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Largest number of pairs. Edge weights are reported but not optimised.
    MaximizeCount,
    /// Largest total weight; non-positive edges are never worth taking.
    #[default]
    MaximizeWeight,
}

impl Objective {
    pub const ALL: [Objective; 2] = [Objective::MaximizeCount, Objective::MaximizeWeight];

    pub fn name(self) -> &'static str {
        match self {
            Objective::MaximizeCount => "maximize_count",
            Objective::MaximizeWeight => "maximize_weight",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One driver-rider pairing in a solved matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub driver: ParticipantId,
    pub rider: ParticipantId,
    pub weight: f64,
}

/// Solver output: pairs sorted by driver id, each id used at most once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Matching {
    pub pairs: Vec<MatchedPair>,
    /// Pair count for `MaximizeCount`, summed weight for `MaximizeWeight`.
    pub objective_value: f64,
    /// Summed edge weight of the selected pairs.
    pub total_weight: f64,
}

impl Matching {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collects `(row, col)` graph positions into a matching.
    pub(crate) fn from_positions(
        graph: &BipartiteGraph,
        objective: Objective,
        positions: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut pairs: Vec<MatchedPair> = positions
            .into_iter()
            .filter_map(|(row, col)| {
                graph.weight(row, col).map(|weight| MatchedPair {
                    driver: graph.driver_id(row),
                    rider: graph.rider_id(col),
                    weight,
                })
            })
            .collect();
        pairs.sort_by_key(|pair| (pair.driver, pair.rider));

        // Folding from +0.0 keeps the empty sum positive zero.
        let total_weight = pairs.iter().fold(0.0, |acc, pair| acc + pair.weight);
        let objective_value = match objective {
            Objective::MaximizeCount => pairs.len() as f64,
            Objective::MaximizeWeight => total_weight,
        };
        Self {
            pairs,
            objective_value,
            total_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `(driver, rider)` id pairs in driver order.
    pub fn id_pairs(&self) -> Vec<(u64, u64)> {
        self.pairs
            .iter()
            .map(|pair| (pair.driver.0, pair.rider.0))
            .collect()
    }

    /// Checks that no id repeats and every pair is a feasible edge of `graph`.
    pub fn validate(&self, graph: &BipartiteGraph) -> Result<(), String> {
        let mut drivers = HashSet::new();
        let mut riders = HashSet::new();
        for pair in &self.pairs {
            if !drivers.insert(pair.driver) {
                return Err(format!("driver {} matched twice", pair.driver));
            }
            if !riders.insert(pair.rider) {
                return Err(format!("rider {} matched twice", pair.rider));
            }
            let edge = graph
                .row_of(pair.driver)
                .zip(graph.col_of(pair.rider))
                .and_then(|(row, col)| graph.weight(row, col));
            if edge.is_none() {
                return Err(format!(
                    "pair ({}, {}) is not a feasible edge",
                    pair.driver, pair.rider
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objective_value_depends_on_objective() {
        let graph =
            BipartiteGraph::from_dense(&[1, 2], &[10, 20], &[vec![2.5, 0.0], vec![0.0, 4.0]]);
        let count = Matching::from_positions(&graph, Objective::MaximizeCount, [(0, 0), (1, 1)]);
        let weight = Matching::from_positions(&graph, Objective::MaximizeWeight, [(1, 1), (0, 0)]);
        assert_eq!(count.objective_value, 2.0);
        assert_eq!(count.total_weight, 6.5);
        assert_eq!(weight.objective_value, 6.5);
        assert_eq!(weight.id_pairs(), vec![(1, 10), (2, 20)]);
    }

    #[test]
    fn empty_weighted_matching_reports_positive_zero() {
        let graph = BipartiteGraph::from_dense(&[1], &[10], &[vec![-3.0]]);
        let matching = Matching::from_positions(&graph, Objective::MaximizeWeight, []);
        assert!(matching.is_empty());
        assert!(matching.objective_value.is_sign_positive());
        assert!(matching.total_weight.is_sign_positive());
        assert_eq!(
            serde_json::to_value(&matching).expect("json")["objective_value"],
            serde_json::json!(0.0)
        );
        assert_eq!(format!("{:.3}", matching.objective_value), "0.000");
    }

    #[test]
    fn validate_rejects_reused_rider() {
        let graph = BipartiteGraph::from_dense(&[1, 2], &[10], &[vec![1.0], vec![1.0]]);
        let matching = Matching {
            pairs: vec![
                MatchedPair { driver: ParticipantId(1), rider: ParticipantId(10), weight: 1.0 },
                MatchedPair { driver: ParticipantId(2), rider: ParticipantId(10), weight: 1.0 },
            ],
            objective_value: 2.0,
            total_weight: 2.0,
        };
        assert!(matching.validate(&graph).is_err());
    }
}
