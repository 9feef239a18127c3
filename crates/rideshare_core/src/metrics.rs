//! Matching Rate and Additional Kilometers Saved for a solved run.
//!
//! Both metrics come in two flavours that disagree numerically, so callers
//! name the one they want:
//!
//! - Matching rate over all participants (`2|M| / (D + R)`) or over riders
//!   only (`|M| / R`).
//! - Kilometers saved summed over matched pairs or averaged per pair.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::MatchOutcome;
use crate::error::MatchError;
use crate::participant::{Participant, ParticipantId};
use crate::spatial::DistanceMetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingRateBasis {
    /// Share of all participant slots filled.
    #[default]
    AllParticipants,
    /// Share of riders matched.
    RiderCentric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsAggregation {
    Sum,
    #[default]
    Mean,
}

impl fmt::Display for MatchingRateBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingRateBasis::AllParticipants => f.write_str("all_participants"),
            MatchingRateBasis::RiderCentric => f.write_str("rider_centric"),
        }
    }
}

impl fmt::Display for SavingsAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavingsAggregation::Sum => f.write_str("sum"),
            SavingsAggregation::Mean => f.write_str("mean"),
        }
    }
}

pub fn matching_rate(
    matches: usize,
    drivers: usize,
    riders: usize,
    basis: MatchingRateBasis,
) -> f64 {
    match basis {
        MatchingRateBasis::AllParticipants if drivers + riders > 0 => {
            2.0 * matches as f64 / (drivers + riders) as f64
        }
        MatchingRateBasis::RiderCentric if riders > 0 => matches as f64 / riders as f64,
        _ => 0.0,
    }
}

/// Aggregates per-pair savings; the mean of no pairs is zero.
pub fn aggregate_savings(savings: &[f64], aggregation: SavingsAggregation) -> f64 {
    let total: f64 = savings.iter().sum();
    match aggregation {
        SavingsAggregation::Sum => total,
        SavingsAggregation::Mean if !savings.is_empty() => total / savings.len() as f64,
        SavingsAggregation::Mean => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub matches: usize,
    pub matching_rate: f64,
    pub basis: MatchingRateBasis,
    pub km_saved: f64,
    pub aggregation: SavingsAggregation,
    pub metric: DistanceMetric,
}

impl MetricsReport {
    /// Derives the report from a solved run. `drivers` and `riders` are the
    /// populations the run was solved on.
    pub fn compute(
        outcome: &MatchOutcome,
        drivers: &[Participant],
        riders: &[Participant],
        basis: MatchingRateBasis,
        aggregation: SavingsAggregation,
    ) -> Result<Self, MatchError> {
        let driver_by_id: HashMap<ParticipantId, &Participant> =
            drivers.iter().map(|p| (p.id, p)).collect();
        let rider_by_id: HashMap<ParticipantId, &Participant> =
            riders.iter().map(|p| (p.id, p)).collect();
        let savings = outcome
            .matching
            .pairs
            .iter()
            .map(|pair| {
                let driver = lookup(&driver_by_id, pair.driver)?;
                let rider = lookup(&rider_by_id, pair.rider)?;
                Ok(driver.trip_length_km + rider.trip_length_km
                    - outcome.metric.three_leg_length(driver, rider))
            })
            .collect::<Result<Vec<f64>, MatchError>>()?;

        let matches = outcome.matching.len();
        Ok(Self {
            matches,
            matching_rate: matching_rate(matches, drivers.len(), riders.len(), basis),
            basis,
            km_saved: aggregate_savings(&savings, aggregation),
            aggregation,
            metric: outcome.metric,
        })
    }
}

fn lookup<'a>(
    table: &HashMap<ParticipantId, &'a Participant>,
    id: ParticipantId,
) -> Result<&'a Participant, MatchError> {
    table.get(&id).copied().ok_or_else(|| MatchError::InvalidInput {
        id,
        reason: "matched participant missing from the supplied population".to_string(),
    })
}
