use serde::{Deserialize, Serialize};

use crate::graph::{Feasibility, GraphBuilder};
use crate::matching::Objective;
use crate::spatial::DistanceMetric;
use crate::weights::{WeightCalculator, WeightStrategy};

/// Everything that parameterises one optimisation run.
///
/// Missing fields fall back to [`SolveConfig::default`] when deserialised, so
/// a JSON file only has to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    pub strategy: WeightStrategy,
    pub metric: DistanceMetric,
    pub objective: Objective,
    pub feasibility: Feasibility,
    /// Fill the weight matrix on the rayon pool.
    pub parallel: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            strategy: WeightStrategy::DistanceSavings,
            metric: DistanceMetric::Haversine,
            objective: Objective::MaximizeWeight,
            feasibility: Feasibility::Complete,
            parallel: true,
        }
    }
}

impl SolveConfig {
    pub fn with_strategy(mut self, strategy: WeightStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_feasibility(mut self, feasibility: Feasibility) -> Self {
        self.feasibility = feasibility;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn calculator(&self) -> WeightCalculator {
        WeightCalculator::new(self.strategy, self.metric)
    }

    pub fn graph_builder(&self) -> GraphBuilder {
        GraphBuilder::new(self.calculator())
            .with_feasibility(self.feasibility)
            .with_parallel(self.parallel)
    }
}
