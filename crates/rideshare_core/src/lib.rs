//! One-to-one matching of riders and drivers.
//!
//! Data flows leaf to root through the modules:
//!
//! - [`participant`]: immutable driver and rider records
//! - [`spatial`]: distance metrics (Manhattan on coordinates, haversine km)
//! - [`weights`]: per-pair edge weight strategies
//! - [`graph`]: the weighted bipartite graph and its builder
//! - [`matching`]: exact assignment solvers and a greedy baseline
//! - [`engine`]: the `solve` entry point
//! - [`metrics`]: Matching Rate and Additional Kilometers Saved
//!
//! # Quick Start
//!
//! ```rust
//! use rideshare_core::{solve, DistanceMetric, GeoPoint, Participant, SolveConfig};
//!
//! let drivers = vec![Participant::driver(
//!     1,
//!     GeoPoint::new(0.0, 0.0),
//!     GeoPoint::new(10.0, 0.0),
//!     10.0,
//! )];
//! let riders = vec![Participant::rider(
//!     100,
//!     GeoPoint::new(0.0, 1.0),
//!     GeoPoint::new(5.0, 1.0),
//!     5.0,
//! )];
//! let config = SolveConfig::default().with_metric(DistanceMetric::Manhattan);
//!
//! let outcome = solve(&drivers, &riders, &config).unwrap();
//! assert_eq!(outcome.matching.id_pairs(), vec![(1, 100)]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod matching;
pub mod metrics;
pub mod participant;
pub mod spatial;
pub mod weights;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use config::SolveConfig;
pub use engine::{solve, solve_with, MatchOutcome};
pub use error::MatchError;
pub use graph::{BipartiteGraph, Feasibility, GraphBuilder};
pub use matching::{MatchedPair, Matching, MatchingAlgorithm, Objective};
pub use metrics::{MatchingRateBasis, MetricsReport, SavingsAggregation};
pub use participant::{GeoPoint, Participant, ParticipantId, Role};
pub use spatial::DistanceMetric;
pub use weights::{WeightCalculator, WeightStrategy};
