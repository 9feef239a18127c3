//! Experiment configuration loaded from JSON.
//!
//! Every field is optional in the file; command line flags override what the
//! file sets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rideshare_core::{MatchingRateBasis, SavingsAggregation, SolveConfig};
use serde::{Deserialize, Serialize};

use crate::store::{ParticipantStore, RoleSplit, DEFAULT_SIDE_LIMIT};
use crate::sweep::SweepSpace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Announcement CSV to read participants from.
    pub csv_path: Option<PathBuf>,
    pub driver_limit: usize,
    pub rider_limit: usize,
    pub split: RoleSplit,
    pub solve: SolveConfig,
    pub basis: MatchingRateBasis,
    pub aggregation: SavingsAggregation,
    pub sweep: SweepSpace,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            driver_limit: DEFAULT_SIDE_LIMIT,
            rider_limit: DEFAULT_SIDE_LIMIT,
            split: RoleSplit::default(),
            solve: SolveConfig::default(),
            basis: MatchingRateBasis::default(),
            aggregation: SavingsAggregation::default(),
            sweep: SweepSpace::grid(),
        }
    }
}

impl ExperimentConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Loads the configured CSV with the configured split and limits.
    pub fn load_store(&self) -> Result<ParticipantStore> {
        let path = self
            .csv_path
            .as_ref()
            .context("no participant CSV configured; pass --input or set csv_path")?;
        ParticipantStore::load(path, self.split, self.driver_limit, self.rider_limit)
    }

    /// The sweep grid with this config's solve settings as its base.
    pub fn sweep_space(&self) -> SweepSpace {
        self.sweep
            .clone()
            .base(self.solve)
            .basis(self.basis)
            .aggregation(self.aggregation)
    }
}
