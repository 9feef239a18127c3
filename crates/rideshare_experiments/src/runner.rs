//! Parallel sweep execution using rayon.
//!
//! Every run solves the same participant store with its own configuration.
//! Runs share nothing but the store, so they execute independently on a
//! rayon pool.

use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rideshare_core::{solve, MatchError, MetricsReport};
use serde::Serialize;

use crate::store::ParticipantStore;
use crate::sweep::RunSpec;

/// Scores of one sweep run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub spec: RunSpec,
    pub report: MetricsReport,
    /// Pair count or summed weight, depending on the run's objective.
    pub objective_value: f64,
    /// Summed edge weight of the matched pairs.
    pub total_weight: f64,
    /// Wall time of graph construction plus solving.
    pub elapsed_ms: f64,
}

/// Solves one run and scores it.
pub fn run_single(store: &ParticipantStore, spec: &RunSpec) -> Result<SweepResult, MatchError> {
    let started = Instant::now();
    let outcome = solve(&store.drivers, &store.riders, &spec.config)?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1_000.0;
    let report = MetricsReport::compute(
        &outcome,
        &store.drivers,
        &store.riders,
        spec.basis,
        spec.aggregation,
    )?;
    Ok(SweepResult {
        spec: *spec,
        report,
        objective_value: outcome.matching.objective_value,
        total_weight: outcome.matching.total_weight,
        elapsed_ms,
    })
}

/// Run every [`RunSpec`] against `store` in parallel, with a progress bar.
///
/// Results come back in the same order as `specs`. The first failing run
/// aborts the sweep.
pub fn run_parallel_sweep(
    store: &ParticipantStore,
    specs: Vec<RunSpec>,
    num_threads: Option<usize>,
) -> Result<Vec<SweepResult>> {
    run_parallel_sweep_with_progress(store, specs, num_threads, true)
}

/// Like [`run_parallel_sweep`], with the progress bar optional.
pub fn run_parallel_sweep_with_progress(
    store: &ParticipantStore,
    specs: Vec<RunSpec>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SweepResult>> {
    let total = specs.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .context("invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build().context("failed to create thread pool")?;

    let results = pool.install(|| {
        specs
            .par_iter()
            .map(|spec| {
                let result = run_single(store, spec)
                    .with_context(|| format!("run {} ({}) failed", spec.run_id, spec.label()));
                if let Some(ref progress_bar) = pb {
                    progress_bar.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>>>()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    results
}
