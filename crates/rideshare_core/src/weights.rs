//! Edge weights for candidate (driver, rider) pairs.
//!
//! Every strategy is maximised by the weighted solver. `DistanceSavings` can be
//! negative, in which case leaving both sides unmatched is the better choice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::participant::Participant;
use crate::spatial::DistanceMetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightStrategy {
    /// Solo trip lengths minus the shared three-leg route.
    #[default]
    DistanceSavings,
    /// Ratio of the shorter to the longer solo trip, in (0, 1].
    DistanceProximity,
    /// Proximity scaled by the driver's solo trip over the shared route.
    AdjustedProximity,
}

impl WeightStrategy {
    pub const ALL: [WeightStrategy; 3] = [
        WeightStrategy::DistanceSavings,
        WeightStrategy::DistanceProximity,
        WeightStrategy::AdjustedProximity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeightStrategy::DistanceSavings => "distance_savings",
            WeightStrategy::DistanceProximity => "distance_proximity",
            WeightStrategy::AdjustedProximity => "adjusted_proximity",
        }
    }

    fn divides_by_trip_length(self) -> bool {
        !matches!(self, WeightStrategy::DistanceSavings)
    }
}

impl fmt::Display for WeightStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy plus the distance metric it measures routes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightCalculator {
    pub strategy: WeightStrategy,
    pub metric: DistanceMetric,
}

impl WeightCalculator {
    pub fn new(strategy: WeightStrategy, metric: DistanceMetric) -> Self {
        Self { strategy, metric }
    }

    /// Rejects zero-length trips up front for strategies that divide by them,
    /// so the error is reported before any pair is evaluated.
    pub fn check_populations(
        &self,
        drivers: &[Participant],
        riders: &[Participant],
    ) -> Result<(), MatchError> {
        if !self.strategy.divides_by_trip_length() {
            return Ok(());
        }
        let zero_driver = drivers.iter().find(|d| d.trip_length_km == 0.0);
        let zero_rider = riders.iter().find(|r| r.trip_length_km == 0.0);
        match (zero_driver, zero_rider) {
            (Some(driver), _) if !riders.is_empty() => Err(MatchError::UndefinedWeight {
                driver: driver.id,
                rider: riders[0].id,
                reason: format!("driver trip length is zero under {}", self.strategy),
            }),
            (_, Some(rider)) if !drivers.is_empty() => Err(MatchError::UndefinedWeight {
                driver: drivers[0].id,
                rider: rider.id,
                reason: format!("rider trip length is zero under {}", self.strategy),
            }),
            _ => Ok(()),
        }
    }

    /// Edge weight of the pair. Fails with `UndefinedWeight` when the value
    /// would divide by zero or is not a finite number.
    pub fn weight(&self, driver: &Participant, rider: &Participant) -> Result<f64, MatchError> {
        let weight = match self.strategy {
            WeightStrategy::DistanceSavings => self.savings(driver, rider),
            WeightStrategy::DistanceProximity => proximity(driver, rider)?,
            WeightStrategy::AdjustedProximity => {
                let proximity = proximity(driver, rider)?;
                let detour = self.metric.three_leg_length(driver, rider);
                if detour == 0.0 {
                    return Err(undefined(driver, rider, "shared route length is zero"));
                }
                driver.trip_length_km / detour * proximity
            }
        };
        if !weight.is_finite() {
            return Err(undefined(driver, rider, "weight is not a finite number"));
        }
        Ok(weight)
    }

    /// Distance saved by sharing: both solo trips minus the shared route.
    pub fn savings(&self, driver: &Participant, rider: &Participant) -> f64 {
        driver.trip_length_km + rider.trip_length_km - self.metric.three_leg_length(driver, rider)
    }
}

fn proximity(driver: &Participant, rider: &Participant) -> Result<f64, MatchError> {
    let (d, r) = (driver.trip_length_km, rider.trip_length_km);
    if d == 0.0 || r == 0.0 {
        return Err(undefined(driver, rider, "trip length is zero"));
    }
    Ok((d / r).min(r / d))
}

fn undefined(driver: &Participant, rider: &Participant, reason: &str) -> MatchError {
    MatchError::UndefinedWeight {
        driver: driver.id,
        rider: rider.id,
        reason: reason.to_string(),
    }
}
