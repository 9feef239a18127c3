use anyhow::Result;

use super::feasibility_label;
use crate::runner::SweepResult;

pub(crate) fn export_to_csv_impl(results: &[SweepResult], file: std::fs::File) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "run_id",
        "strategy",
        "metric",
        "objective",
        "feasibility",
        "rate_basis",
        "savings_aggregation",
        "matches",
        "matching_rate",
        "km_saved",
        "objective_value",
        "total_weight",
        "elapsed_ms",
    ])?;

    for result in results {
        let spec = &result.spec;
        wtr.write_record([
            spec.run_id.to_string(),
            spec.config.strategy.to_string(),
            spec.config.metric.to_string(),
            spec.config.objective.to_string(),
            feasibility_label(&spec.config.feasibility),
            spec.basis.to_string(),
            spec.aggregation.to_string(),
            result.report.matches.to_string(),
            result.report.matching_rate.to_string(),
            result.report.km_saved.to_string(),
            result.objective_value.to_string(),
            result.total_weight.to_string(),
            result.elapsed_ms.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
