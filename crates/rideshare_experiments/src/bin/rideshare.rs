use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rideshare_core::{
    solve, DistanceMetric, Feasibility, MatchingRateBasis, MetricsReport, Objective,
    SavingsAggregation, WeightStrategy,
};
use rideshare_experiments::{
    export_matching_to_json, export_to_csv, export_to_json, print_report, print_sweep_summary,
    run_parallel_sweep, ExperimentConfig, RoleSplit,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "rideshare",
    about = "Optimal one-to-one matching of riders and drivers",
    long_about = "Solves rider/driver matching on announcement CSV data, either for\n\
                  one configuration or for a sweep over weight strategies, distance\n\
                  metrics and objectives."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one configuration and print the matching
    Solve {
        #[command(flatten)]
        common: CommonArgs,
        /// Edge weight strategy
        #[arg(value_enum, long)]
        strategy: Option<StrategyArg>,
        /// Distance metric for shared routes
        #[arg(value_enum, long)]
        metric: Option<MetricArg>,
        /// Optimisation objective
        #[arg(value_enum, long)]
        objective: Option<ObjectiveArg>,
        /// Write the matching as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Solve every strategy x metric x objective combination in parallel
    Sweep {
        #[command(flatten)]
        common: CommonArgs,
        /// Write per-run results as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write per-run results as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Worker threads (defaults to the number of cores)
        #[arg(long)]
        threads: Option<usize>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Announcement CSV with participant trips
    #[arg(short, long, env = "RIDESHARE_INPUT")]
    input: Option<PathBuf>,
    /// JSON experiment config; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of drivers, earliest announcements first
    #[arg(long)]
    drivers: Option<usize>,
    /// Maximum number of riders, earliest announcements first
    #[arg(long)]
    riders: Option<usize>,
    /// How rows are split into drivers and riders
    #[arg(value_enum, long)]
    split: Option<SplitArg>,
    /// Announcement id separating drivers (below) from riders (above)
    #[arg(long)]
    threshold: Option<u64>,
    /// Edge pruning rule
    #[arg(value_enum, long)]
    feasibility: Option<FeasibilityArg>,
    /// Detour bound for `--feasibility max-detour`, in the metric's unit
    /// (degrees under Manhattan)
    #[arg(long, default_value_t = 5.0)]
    max_detour_km: f64,
    /// Denominator of the matching rate
    #[arg(value_enum, long)]
    basis: Option<BasisArg>,
    /// How per-pair savings are combined
    #[arg(value_enum, long)]
    aggregation: Option<AggregationArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Savings,
    Proximity,
    AdjustedProximity,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Manhattan,
    Haversine,
}

#[derive(Clone, Copy, ValueEnum)]
enum ObjectiveArg {
    /// Most pairs
    Count,
    /// Largest total weight
    Weight,
}

#[derive(Clone, Copy, ValueEnum)]
enum SplitArg {
    /// Split by announcement id threshold
    Threshold,
    /// First half riders, second half drivers
    Halves,
}

#[derive(Clone, Copy, ValueEnum)]
enum FeasibilityArg {
    Complete,
    TimeWindow,
    MaxDetour,
}

#[derive(Clone, Copy, ValueEnum)]
enum BasisArg {
    /// 2|M| / (drivers + riders)
    All,
    /// |M| / riders
    Riders,
}

#[derive(Clone, Copy, ValueEnum)]
enum AggregationArg {
    Sum,
    Mean,
}

impl From<StrategyArg> for WeightStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Savings => WeightStrategy::DistanceSavings,
            StrategyArg::Proximity => WeightStrategy::DistanceProximity,
            StrategyArg::AdjustedProximity => WeightStrategy::AdjustedProximity,
        }
    }
}

impl From<MetricArg> for DistanceMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Manhattan => DistanceMetric::Manhattan,
            MetricArg::Haversine => DistanceMetric::Haversine,
        }
    }
}

impl From<ObjectiveArg> for Objective {
    fn from(arg: ObjectiveArg) -> Self {
        match arg {
            ObjectiveArg::Count => Objective::MaximizeCount,
            ObjectiveArg::Weight => Objective::MaximizeWeight,
        }
    }
}

impl From<BasisArg> for MatchingRateBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::All => MatchingRateBasis::AllParticipants,
            BasisArg::Riders => MatchingRateBasis::RiderCentric,
        }
    }
}

impl From<AggregationArg> for SavingsAggregation {
    fn from(arg: AggregationArg) -> Self {
        match arg {
            AggregationArg::Sum => SavingsAggregation::Sum,
            AggregationArg::Mean => SavingsAggregation::Mean,
        }
    }
}

impl CommonArgs {
    /// Config file (or defaults) with the command line applied on top.
    fn resolve(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_json_file(path)?,
            None => ExperimentConfig::default(),
        };
        if let Some(input) = &self.input {
            config.csv_path = Some(input.clone());
        }
        if let Some(limit) = self.drivers {
            config.driver_limit = limit;
        }
        if let Some(limit) = self.riders {
            config.rider_limit = limit;
        }
        match (self.split, self.threshold) {
            (Some(SplitArg::Halves), _) => config.split = RoleSplit::Halves,
            (Some(SplitArg::Threshold), threshold) | (None, threshold @ Some(_)) => {
                let current = match config.split {
                    RoleSplit::AnnouncementThreshold { threshold } => threshold,
                    RoleSplit::Halves => rideshare_experiments::DEFAULT_ANNOUNCEMENT_THRESHOLD,
                };
                config.split = RoleSplit::AnnouncementThreshold {
                    threshold: threshold.unwrap_or(current),
                };
            }
            (None, None) => {}
        }
        if let Some(feasibility) = self.feasibility {
            config.solve.feasibility = match feasibility {
                FeasibilityArg::Complete => Feasibility::Complete,
                FeasibilityArg::TimeWindow => Feasibility::TimeWindowOverlap,
                FeasibilityArg::MaxDetour => Feasibility::MaxDetour {
                    km: self.max_detour_km,
                },
            };
        }
        if let Some(basis) = self.basis {
            config.basis = basis.into();
        }
        if let Some(aggregation) = self.aggregation {
            config.aggregation = aggregation.into();
        }
        Ok(config)
    }
}

// ── Main ───────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve {
            common,
            strategy,
            metric,
            objective,
            output,
        } => {
            let mut config = common.resolve()?;
            if let Some(strategy) = strategy {
                config.solve.strategy = strategy.into();
            }
            if let Some(metric) = metric {
                config.solve.metric = metric.into();
            }
            if let Some(objective) = objective {
                config.solve.objective = objective.into();
            }
            run_solve(&config, output)
        }
        Commands::Sweep {
            common,
            csv,
            json,
            threads,
        } => run_sweep(&common.resolve()?, csv, json, threads),
    }
}

fn run_solve(config: &ExperimentConfig, output: Option<PathBuf>) -> Result<()> {
    let store = config.load_store()?;
    let outcome = solve(&store.drivers, &store.riders, &config.solve)?;
    let report = MetricsReport::compute(
        &outcome,
        &store.drivers,
        &store.riders,
        config.basis,
        config.aggregation,
    )?;
    print_report(&outcome, &report)?;

    if let Some(path) = output {
        export_matching_to_json(&outcome, &path)?;
        info!(path = %path.display(), "matching written");
    }
    Ok(())
}

fn run_sweep(
    config: &ExperimentConfig,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    threads: Option<usize>,
) -> Result<()> {
    let store = config.load_store()?;
    let specs = config.sweep_space().generate();
    info!(runs = specs.len(), "starting sweep");

    let results = run_parallel_sweep(&store, specs, threads)?;
    print_sweep_summary(&results)?;

    if let Some(path) = csv {
        export_to_csv(&results, &path)?;
        info!(path = %path.display(), "sweep results written");
    }
    if let Some(path) = json {
        export_to_json(&results, &path)?;
        info!(path = %path.display(), "sweep results written");
    }
    Ok(())
}
