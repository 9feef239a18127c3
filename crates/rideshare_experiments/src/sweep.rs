//! Configuration grid for sweeps.
//!
//! A [`SweepSpace`] lists the weight strategies, distance metrics and
//! objectives to explore; [`SweepSpace::generate`] expands their Cartesian
//! product into [`RunSpec`]s. An empty list falls back to the base
//! configuration's value for that axis.

use rideshare_core::{
    DistanceMetric, MatchingRateBasis, Objective, SavingsAggregation, SolveConfig, WeightStrategy,
};
use serde::{Deserialize, Serialize};

/// One run of a sweep: a solve configuration plus how to score it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Position in the generated grid.
    pub run_id: usize,
    pub config: SolveConfig,
    pub basis: MatchingRateBasis,
    pub aggregation: SavingsAggregation,
}

impl RunSpec {
    pub fn new(run_id: usize, config: SolveConfig) -> Self {
        Self {
            run_id,
            config,
            basis: MatchingRateBasis::default(),
            aggregation: SavingsAggregation::default(),
        }
    }

    /// `strategy/metric/objective`, e.g. `distance_savings/haversine/maximize_weight`.
    pub fn label(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.strategy, self.config.metric, self.config.objective
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSpace {
    pub strategies: Vec<WeightStrategy>,
    pub metrics: Vec<DistanceMetric>,
    pub objectives: Vec<Objective>,
    /// Values for everything the grid does not vary.
    #[serde(skip)]
    base: SolveConfig,
    #[serde(skip)]
    basis: MatchingRateBasis,
    #[serde(skip)]
    aggregation: SavingsAggregation,
}

impl Default for SweepSpace {
    fn default() -> Self {
        Self::grid()
    }
}

impl SweepSpace {
    /// The full grid: every strategy, metric and objective.
    pub fn grid() -> Self {
        Self {
            strategies: WeightStrategy::ALL.to_vec(),
            metrics: DistanceMetric::ALL.to_vec(),
            objectives: Objective::ALL.to_vec(),
            base: SolveConfig::default(),
            basis: MatchingRateBasis::default(),
            aggregation: SavingsAggregation::default(),
        }
    }

    pub fn strategies(mut self, strategies: Vec<WeightStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn metrics(mut self, metrics: Vec<DistanceMetric>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn objectives(mut self, objectives: Vec<Objective>) -> Self {
        self.objectives = objectives;
        self
    }

    /// Feasibility, parallelism and any emptied axis come from `base`.
    pub fn base(mut self, base: SolveConfig) -> Self {
        self.base = base;
        self
    }

    pub fn basis(mut self, basis: MatchingRateBasis) -> Self {
        self.basis = basis;
        self
    }

    pub fn aggregation(mut self, aggregation: SavingsAggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn len(&self) -> usize {
        axis(&self.strategies, self.base.strategy).len()
            * axis(&self.metrics, self.base.metric).len()
            * axis(&self.objectives, self.base.objective).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strategies vary slowest, objectives fastest.
    pub fn generate(&self) -> Vec<RunSpec> {
        let strategies = axis(&self.strategies, self.base.strategy);
        let metrics = axis(&self.metrics, self.base.metric);
        let objectives = axis(&self.objectives, self.base.objective);

        let mut specs = Vec::with_capacity(self.len());
        for &strategy in &strategies {
            for &metric in &metrics {
                for &objective in &objectives {
                    let config = self
                        .base
                        .with_strategy(strategy)
                        .with_metric(metric)
                        .with_objective(objective);
                    specs.push(RunSpec {
                        run_id: specs.len(),
                        config,
                        basis: self.basis,
                        aggregation: self.aggregation,
                    });
                }
            }
        }
        specs
    }
}

fn axis<T: Copy>(values: &[T], fallback: T) -> Vec<T> {
    if values.is_empty() {
        vec![fallback]
    } else {
        values.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rideshare_core::Feasibility;

    #[test]
    fn full_grid_has_every_combination() {
        let specs = SweepSpace::grid().generate();
        assert_eq!(specs.len(), 3 * 2 * 2);
        assert_eq!(specs[0].run_id, 0);
        assert_eq!(specs[11].run_id, 11);
        assert_eq!(specs[0].config.strategy, WeightStrategy::DistanceSavings);
        assert_eq!(specs[1].config.objective, Objective::MaximizeWeight);
        assert_eq!(specs[0].config.objective, Objective::MaximizeCount);
    }

    #[test]
    fn empty_axis_falls_back_to_base() {
        let base = SolveConfig::default()
            .with_metric(DistanceMetric::Manhattan)
            .with_feasibility(Feasibility::TimeWindowOverlap);
        let specs = SweepSpace::grid()
            .base(base)
            .metrics(vec![])
            .objectives(vec![Objective::MaximizeWeight])
            .generate();
        assert_eq!(specs.len(), 3);
        assert!(specs.iter().all(|s| s.config.metric == DistanceMetric::Manhattan));
        assert!(specs
            .iter()
            .all(|s| s.config.feasibility == Feasibility::TimeWindowOverlap));
    }

    #[test]
    fn scoring_options_reach_every_run() {
        let specs = SweepSpace::grid()
            .basis(MatchingRateBasis::RiderCentric)
            .aggregation(SavingsAggregation::Sum)
            .generate();
        assert!(specs.iter().all(|s| s.basis == MatchingRateBasis::RiderCentric));
        assert!(specs.iter().all(|s| s.aggregation == SavingsAggregation::Sum));
    }

    #[test]
    fn label_names_the_axes() {
        let spec = RunSpec::new(0, SolveConfig::default());
        assert_eq!(spec.label(), "distance_savings/haversine/maximize_weight");
    }

    #[test]
    fn sweep_space_reads_from_json() {
        let space: SweepSpace =
            serde_json::from_str(r#"{"metrics": ["manhattan"]}"#).expect("space");
        assert_eq!(space.metrics, vec![DistanceMetric::Manhattan]);
        assert_eq!(space.strategies.len(), 3);
    }
}
