//! Batch experiments over the rider/driver matching engine.
//!
//! Loads participants from the announcement CSV format, solves one or many
//! configurations against the same populations, and exports the results.
//!
//! # Quick Start
//!
//! ```no_run
//! use rideshare_experiments::{run_parallel_sweep, ParticipantStore, RoleSplit, SweepSpace};
//!
//! let store = ParticipantStore::load("announcements.csv", RoleSplit::default(), 500, 500)?;
//! let specs = SweepSpace::grid().generate();
//! let results = run_parallel_sweep(&store, specs, None)?;
//! rideshare_experiments::export_to_csv(&results, "sweep.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Architecture
//!
//! - [`store`]: CSV participant loading and the driver/rider role split
//! - [`config`]: JSON experiment configuration
//! - [`sweep`]: grid of strategies, metrics and objectives
//! - [`runner`]: parallel sweep execution using rayon
//! - [`export`]: result export to CSV/JSON
//! - [`report`]: console summaries

pub mod config;
pub mod export;
pub mod report;
pub mod runner;
pub mod store;
pub mod sweep;

pub use config::ExperimentConfig;
pub use export::{export_matching_to_json, export_to_csv, export_to_json};
pub use report::{print_report, print_sweep_summary};
pub use runner::{run_parallel_sweep, run_parallel_sweep_with_progress, run_single, SweepResult};
pub use store::{ParticipantStore, RoleSplit, DEFAULT_ANNOUNCEMENT_THRESHOLD, DEFAULT_SIDE_LIMIT};
pub use sweep::{RunSpec, SweepSpace};
