//! Weighted bipartite graph between drivers (rows) and riders (columns).
//!
//! Rows and columns are stored in ascending id order regardless of the order
//! the participant store supplied them in, so solvers can break ties by
//! index. Missing edges (`None`) are pruned by a feasibility rule.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MatchError;
use crate::participant::{validate_population, Participant, ParticipantId, Role};
use crate::spatial::DistanceMetric;
use crate::weights::WeightCalculator;

/// Below this many cells the matrix is filled on the calling thread.
const PARALLEL_MIN_CELLS: usize = 4_096;

/// Edge pruning rule applied while the graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Feasibility {
    /// Every pair is a candidate.
    #[default]
    Complete,
    /// Pairs whose scheduling windows intersect. Pairs where either side has
    /// no window are kept.
    TimeWindowOverlap,
    /// Pairs whose shared route exceeds the driver's solo trip by at most `km`.
    ///
    /// The route legs are measured with the run's metric, so the bound is in
    /// that metric's unit: km under Haversine, coordinate degrees under
    /// Manhattan. `trip_length_km` is subtracted as given and should be
    /// recorded in the same unit.
    MaxDetour { km: f64 },
}

impl Feasibility {
    pub fn allows(
        &self,
        metric: DistanceMetric,
        driver: &Participant,
        rider: &Participant,
    ) -> bool {
        match *self {
            Feasibility::Complete => true,
            Feasibility::TimeWindowOverlap => match (driver.window(), rider.window()) {
                (Some((d_start, d_end)), Some((r_start, r_end))) => {
                    d_start <= r_end && r_start <= d_end
                }
                _ => true,
            },
            Feasibility::MaxDetour { km } => {
                metric.three_leg_length(driver, rider) - driver.trip_length_km <= km
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BipartiteGraph {
    drivers: Vec<ParticipantId>,
    riders: Vec<ParticipantId>,
    /// Row-major `drivers.len() x riders.len()`.
    weights: Vec<Option<f64>>,
}

impl BipartiteGraph {
    /// Builds a graph from an explicit weight table. `weights[i][j]` is the
    /// edge between `drivers[i]` and `riders[j]`; rows and columns are
    /// re-sorted by id.
    ///
    /// # Panics
    ///
    /// Panics if the table shape does not match the id lists.
    pub fn from_weights(
        drivers: Vec<ParticipantId>,
        riders: Vec<ParticipantId>,
        weights: Vec<Vec<Option<f64>>>,
    ) -> Self {
        assert_eq!(weights.len(), drivers.len(), "one weight row per driver");
        assert!(
            weights.iter().all(|row| row.len() == riders.len()),
            "one weight column per rider"
        );
        let row_order = sorted_order(&drivers);
        let col_order = sorted_order(&riders);
        let mut flat = Vec::with_capacity(drivers.len() * riders.len());
        for &i in &row_order {
            for &j in &col_order {
                flat.push(weights[i][j]);
            }
        }
        Self {
            drivers: row_order.iter().map(|&i| drivers[i]).collect(),
            riders: col_order.iter().map(|&j| riders[j]).collect(),
            weights: flat,
        }
    }

    /// Complete graph from a dense table.
    pub fn from_dense(drivers: &[u64], riders: &[u64], weights: &[Vec<f64>]) -> Self {
        Self::from_weights(
            drivers.iter().copied().map(ParticipantId).collect(),
            riders.iter().copied().map(ParticipantId).collect(),
            weights
                .iter()
                .map(|row| row.iter().copied().map(Some).collect())
                .collect(),
        )
    }

    pub fn num_drivers(&self) -> usize {
        self.drivers.len()
    }

    pub fn num_riders(&self) -> usize {
        self.riders.len()
    }

    /// True when one side is empty and only the empty matching exists.
    pub fn is_degenerate(&self) -> bool {
        self.drivers.is_empty() || self.riders.is_empty()
    }

    pub fn driver_id(&self, row: usize) -> ParticipantId {
        self.drivers[row]
    }

    pub fn rider_id(&self, col: usize) -> ParticipantId {
        self.riders[col]
    }

    pub fn driver_ids(&self) -> &[ParticipantId] {
        &self.drivers
    }

    pub fn rider_ids(&self) -> &[ParticipantId] {
        &self.riders
    }

    pub fn weight(&self, row: usize, col: usize) -> Option<f64> {
        self.weights[row * self.riders.len() + col]
    }

    pub fn row_of(&self, id: ParticipantId) -> Option<usize> {
        self.drivers.binary_search(&id).ok()
    }

    pub fn col_of(&self, id: ParticipantId) -> Option<usize> {
        self.riders.binary_search(&id).ok()
    }

    /// Feasible edges as `(row, col, weight)` in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let cols = self.riders.len();
        self.weights
            .iter()
            .enumerate()
            .filter_map(move |(idx, w)| w.map(|w| (idx / cols, idx % cols, w)))
    }

    pub fn feasible_edge_count(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count()
    }

    /// Largest absolute feasible weight, at least 1. Used to scale tie epsilons.
    pub fn weight_scale(&self) -> f64 {
        self.weights
            .iter()
            .flatten()
            .fold(1.0_f64, |acc, w| acc.max(w.abs()))
    }
}

fn sorted_order(ids: &[ParticipantId]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ids.len()).collect();
    order.sort_by_key(|&i| ids[i]);
    order
}

/// Assembles the weight matrix from two participant populations.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    calculator: WeightCalculator,
    feasibility: Feasibility,
    parallel: bool,
}

impl GraphBuilder {
    pub fn new(calculator: WeightCalculator) -> Self {
        Self {
            calculator,
            feasibility: Feasibility::Complete,
            parallel: true,
        }
    }

    pub fn with_feasibility(mut self, feasibility: Feasibility) -> Self {
        self.feasibility = feasibility;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(
        &self,
        drivers: &[Participant],
        riders: &[Participant],
    ) -> Result<BipartiteGraph, MatchError> {
        let feasibility = self.feasibility;
        let metric = self.calculator.metric;
        self.build_with(drivers, riders, move |d, r| feasibility.allows(metric, d, r))
    }

    /// Like [`GraphBuilder::build`] with a caller supplied pruning rule in
    /// place of the configured one.
    pub fn build_with<F>(
        &self,
        drivers: &[Participant],
        riders: &[Participant],
        feasible: F,
    ) -> Result<BipartiteGraph, MatchError>
    where
        F: Fn(&Participant, &Participant) -> bool + Sync,
    {
        validate_population(drivers, Role::Driver)?;
        validate_population(riders, Role::Rider)?;
        self.calculator.check_populations(drivers, riders)?;

        let mut drivers_sorted: Vec<&Participant> = drivers.iter().collect();
        drivers_sorted.sort_by_key(|p| p.id);
        let mut riders_sorted: Vec<&Participant> = riders.iter().collect();
        riders_sorted.sort_by_key(|p| p.id);

        let cols = riders_sorted.len();
        let mut weights = vec![None; drivers_sorted.len() * cols];
        if cols > 0 {
            let calculator = self.calculator;
            let fill_row = |row: usize, cells: &mut [Option<f64>]| -> Result<(), MatchError> {
                let driver = drivers_sorted[row];
                for (cell, &rider) in cells.iter_mut().zip(&riders_sorted) {
                    if feasible(driver, rider) {
                        *cell = Some(calculator.weight(driver, rider)?);
                    }
                }
                Ok(())
            };

            let outcomes: Vec<Result<(), MatchError>> =
                if self.parallel && weights.len() >= PARALLEL_MIN_CELLS {
                    weights
                        .par_chunks_mut(cols)
                        .enumerate()
                        .map(|(row, cells)| fill_row(row, cells))
                        .collect()
                } else {
                    weights
                        .chunks_mut(cols)
                        .enumerate()
                        .map(|(row, cells)| fill_row(row, cells))
                        .collect()
                };
            // First failing row in id order, independent of thread scheduling.
            outcomes.into_iter().collect::<Result<Vec<()>, _>>()?;
        }

        let graph = BipartiteGraph {
            drivers: drivers_sorted.iter().map(|p| p.id).collect(),
            riders: riders_sorted.iter().map(|p| p.id).collect(),
            weights,
        };
        debug!(
            drivers = graph.num_drivers(),
            riders = graph.num_riders(),
            feasible_edges = graph.feasible_edge_count(),
            strategy = %self.calculator.strategy,
            metric = %self.calculator.metric,
            "built bipartite graph"
        );
        Ok(graph)
    }
}
