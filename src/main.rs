use clap::Parser;
use reorder_point::io::reporting;
use reorder_point::model::policy::ServiceLevel;
use reorder_point::planning::config::{PlanningConfig, SourceKind};
use reorder_point::planning::engine::{PlanningRun, ProductOutcome};
use reorder_point::ReorderError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Compute reorder points from daily sales history.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Supplier lead time in days.
    #[arg(long)]
    lead_time_days: Option<u32>,

    /// Named target service level.
    #[arg(long, value_enum)]
    service_level: Option<ServiceLevel>,

    /// Explicit service z-score; wins over --service-level.
    #[arg(long)]
    z_score: Option<f64>,

    /// Long-format sales history CSV (date,product,quantity) instead of synthetic data.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Seed for the synthetic sales generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Days of synthetic history per product.
    #[arg(long)]
    days: Option<usize>,

    /// Write full-precision results to this CSV file.
    #[arg(long)]
    export: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file (or defaults) and layers the flags on top.
    fn into_config(self) -> Result<PlanningConfig, ReorderError> {
        let base = match &self.config {
            Some(path) => PlanningConfig::load(path)?,
            None => PlanningConfig::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(self, mut config: PlanningConfig) -> PlanningConfig {
        if let Some(days) = self.lead_time_days {
            config.policy.lead_time_days = days;
        }
        if let Some(level) = self.service_level {
            config.policy.service_level = level;
            config.policy.service_probability = None;
            config.policy.service_z_score = None;
        }
        if let Some(z) = self.z_score {
            config.policy.service_z_score = Some(z);
        }
        if let Some(path) = self.input {
            config.source.kind = SourceKind::Csv;
            config.source.path = Some(path);
        }
        if let Some(seed) = self.seed {
            config.source.seed = seed;
        }
        if let Some(days) = self.days {
            config.source.days = days;
        }
        if self.export.is_some() {
            config.export = self.export;
        }
        config
    }
}

/// Products whose analysis failed; any of them makes the process exit with 1.
fn failed_products(outcomes: &[ProductOutcome]) -> Vec<&str> {
    outcomes
        .iter()
        .filter(|o| !o.is_ok())
        .map(|o| o.product.as_str())
        .collect()
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not install logger: {}", e);
    }

    // 1. SETUP CONFIGURATION
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "could not load configuration");
            return ExitCode::FAILURE;
        }
    };

    let policy = match config.policy.constants() {
        Ok(policy) => policy,
        Err(e) => {
            error!(error = %e, "invalid policy");
            return ExitCode::FAILURE;
        }
    };

    // 2. PICK THE SALES HISTORY SOURCE
    let provider = match config.source.provider() {
        Ok(provider) => provider,
        Err(e) => {
            error!(error = %e, "invalid sales history source");
            return ExitCode::FAILURE;
        }
    };

    // 3. RUN THE ANALYSIS
    let run = PlanningRun::new(policy, provider);
    let outcomes = match run.run() {
        Ok(outcomes) => outcomes,
        Err(e) => {
            error!(error = %e, "could not load sales history");
            return ExitCode::FAILURE;
        }
    };

    // 4. PRINT REPORT
    println!("{}", reporting::render_header(run.policy(), &config.policy.service_label()));
    for outcome in &outcomes {
        match &outcome.result {
            Ok(analysis) => println!("{}", reporting::render_analysis(&outcome.product, analysis)),
            Err(e) => error!(product = %outcome.product, error = %e, "analysis failed"),
        }
    }

    // 5. EXPORT RESULTS
    if let Some(path) = &config.export {
        if let Err(e) = reporting::write_analysis_csv(path, run.policy(), &outcomes) {
            error!(error = %e, path = %path.display(), "error writing CSV");
            return ExitCode::FAILURE;
        }
    }

    if failed_products(&outcomes).is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
