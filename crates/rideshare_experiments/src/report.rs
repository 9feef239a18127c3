//! Console summaries.

use std::io::{self, Write};

use rideshare_core::{MatchOutcome, MetricsReport};

use crate::runner::SweepResult;

/// Matches listed individually before the remainder is summarised.
const LISTED_MATCHES: usize = 10;

/// Prints totals, metrics and the first few matched pairs to stdout.
pub fn print_report(outcome: &MatchOutcome, report: &MetricsReport) -> io::Result<()> {
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), outcome, report)
}

pub fn write_report<W: Write>(
    out: &mut W,
    outcome: &MatchOutcome,
    report: &MetricsReport,
) -> io::Result<()> {
    writeln!(
        out,
        "Solved {} drivers x {} riders ({}, {}, {}, {})",
        outcome.drivers,
        outcome.riders,
        outcome.algorithm,
        outcome.objective,
        outcome.strategy,
        outcome.metric
    )?;
    writeln!(out, "Total matches: {}", report.matches)?;
    writeln!(out, "Matching rate ({}): {:.2}%", report.basis, report.matching_rate * 100.0)?;
    writeln!(out, "Additional km saved ({}): {:.3}", report.aggregation, report.km_saved)?;
    writeln!(out, "Objective value: {:.3}", outcome.matching.objective_value)?;

    let pairs = &outcome.matching.pairs;
    if pairs.is_empty() {
        return writeln!(out, "No matches.");
    }
    writeln!(out, "Matches:")?;
    for pair in pairs.iter().take(LISTED_MATCHES) {
        writeln!(
            out,
            "  driver {} -> rider {} (weight {:.3})",
            pair.driver, pair.rider, pair.weight
        )?;
    }
    if pairs.len() > LISTED_MATCHES {
        writeln!(out, "  ... and {} more matches", pairs.len() - LISTED_MATCHES)?;
    }
    Ok(())
}

/// One line per run, in run order.
pub fn print_sweep_summary(results: &[SweepResult]) -> io::Result<()> {
    let stdout = io::stdout();
    write_sweep_summary(&mut stdout.lock(), results)
}

pub fn write_sweep_summary<W: Write>(out: &mut W, results: &[SweepResult]) -> io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:<48} {:>8} {:>8} {:>12} {:>10}",
        "run", "configuration", "matches", "rate", "km_saved", "ms"
    )?;
    for result in results {
        writeln!(
            out,
            "{:>4}  {:<48} {:>8} {:>7.2}% {:>12.3} {:>10.1}",
            result.spec.run_id,
            result.spec.label(),
            result.report.matches,
            result.report.matching_rate * 100.0,
            result.report.km_saved,
            result.elapsed_ms,
        )?;
    }
    Ok(())
}
