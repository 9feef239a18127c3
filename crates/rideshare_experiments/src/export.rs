//! Result export utilities.
//!
//! Sweep results go to CSV (one flat row per run) or JSON (the full nested
//! structure). A single solved run can be written as JSON for later analysis.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rideshare_core::{Feasibility, MatchOutcome};

use crate::runner::SweepResult;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;

/// Export sweep results to CSV, one row per run in run order.
///
/// # Errors
///
/// Returns an error if `results` is empty or the file cannot be written.
pub fn export_to_csv(results: &[SweepResult], path: impl AsRef<Path>) -> Result<()> {
    ensure_not_empty(results)?;
    let file = create_output_file(path)?;
    csv::export_to_csv_impl(results, file)
}

/// Export sweep results to a pretty-printed JSON array.
pub fn export_to_json(results: &[SweepResult], path: impl AsRef<Path>) -> Result<()> {
    let file = create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Export one solved run, pairs included.
pub fn export_matching_to_json(outcome: &MatchOutcome, path: impl AsRef<Path>) -> Result<()> {
    let file = create_output_file(path)?;
    json::export_to_json_impl(outcome, file)
}

/// Short column value for a feasibility rule.
pub(crate) fn feasibility_label(feasibility: &Feasibility) -> String {
    match feasibility {
        Feasibility::Complete => "complete".to_string(),
        Feasibility::TimeWindowOverlap => "time_window_overlap".to_string(),
        Feasibility::MaxDetour { km } => format!("max_detour_{km}km"),
    }
}

fn ensure_not_empty<T>(items: &[T]) -> Result<()> {
    if items.is_empty() {
        bail!("no results to export");
    }
    Ok(())
}

fn create_output_file(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    File::create(path).with_context(|| format!("creating output file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::RunSpec;
    use rideshare_core::{
        DistanceMetric, MatchingRateBasis, MetricsReport, SavingsAggregation, SolveConfig,
    };
    use tempfile::NamedTempFile;

    fn result(run_id: usize, matches: usize) -> SweepResult {
        SweepResult {
            spec: RunSpec::new(run_id, SolveConfig::default()),
            report: MetricsReport {
                matches,
                matching_rate: 0.5,
                basis: MatchingRateBasis::AllParticipants,
                km_saved: 3.25,
                aggregation: SavingsAggregation::Mean,
                metric: DistanceMetric::Haversine,
            },
            objective_value: 6.5,
            total_weight: 6.5,
            elapsed_ms: 1.0,
        }
    }

    #[test]
    fn test_export_to_json() {
        let file = NamedTempFile::new().unwrap();
        export_to_json(&[result(0, 2)], file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("matching_rate"));
        assert!(contents.contains("distance_savings"));
    }

    #[test]
    fn test_export_to_csv_writes_one_row_per_run() {
        let file = NamedTempFile::new().unwrap();
        export_to_csv(&[result(0, 2), result(1, 3)], file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("run_id,strategy,metric,objective"));
        assert!(lines[2].starts_with("1,distance_savings,haversine,maximize_weight,complete"));
    }

    #[test]
    fn test_export_to_csv_rejects_empty_results() {
        let file = NamedTempFile::new().unwrap();
        assert!(export_to_csv(&[], file.path()).is_err());
    }

    #[test]
    fn feasibility_labels() {
        assert_eq!(feasibility_label(&Feasibility::MaxDetour { km: 2.5 }), "max_detour_2.5km");
        assert_eq!(feasibility_label(&Feasibility::Complete), "complete");
    }
}
