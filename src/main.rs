//! # ED Flow Monitor
//!
//! Command-line front end for the visit generator and the dashboard engine.
//!
//! ## Usage
//!
//! ```bash
//! # Generate the default synthetic dataset (5000 visits, 90 days, seed 42)
//! ed-flow generate
//!
//! # Generate a smaller, reproducible file
//! ed-flow generate --visits 1000 --start-date 2025-01-01 --days 30 --seed 7 --output visits.csv
//!
//! # Dashboard report for high-acuity ambulance arrivals
//! ed-flow report --data visits.csv --triage 1,2 --mode Ambulance
//!
//! # Same report as JSON
//! ed-flow report --data visits.csv --metric length_of_stay_min --json
//! ```
//!
//! ## Configuration (ed-flow.toml)
//!
//! ```toml
//! [generator]
//! visits = 5000
//! start_date = "2025-10-01"
//! days = 90
//! seed = 42
//! output = "ed_visits.csv"
//!
//! [dashboard]
//! data_path = "ed_visits.csv"
//! sample_cap = 2500
//! histogram_bins = 40
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{debug, info};

use ed_flow::algorithm::dashboard::{Metric, MetricSelection};
use ed_flow::config::AppConfig;
use ed_flow::models::{ArrivalMode, ChiefComplaint, Pod, TriageLevel};
use ed_flow::session::DashboardSession;
use ed_flow::utils::date_utils::{DateFormatConfig, parse_date_string};
use ed_flow::utils::io::VISIT_COLUMNS;
use ed_flow::utils::logging::{print_sample_rows, print_table_summary};

#[derive(Parser, Debug)]
#[command(name = "ed-flow")]
#[command(about = "Emergency department flow monitor: synthetic data and dashboard reports")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a synthetic visit file
    Generate {
        /// Number of visits
        #[arg(long, allow_negative_numbers = true)]
        visits: Option<i64>,

        /// First day of the arrival window
        #[arg(long)]
        start_date: Option<String>,

        /// Length of the arrival window in days
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Filter a visit file and print the dashboard
    Report {
        /// Visit file to load
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// First arrival date to include
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<NaiveDate>,

        /// Last arrival date to include
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<NaiveDate>,

        /// Triage levels to include (comma separated)
        #[arg(long, value_delimiter = ',')]
        triage: Option<Vec<TriageLevel>>,

        /// Chief complaints to include (comma separated)
        #[arg(long, value_delimiter = ',')]
        complaint: Option<Vec<ChiefComplaint>>,

        /// Arrival modes to include (comma separated)
        #[arg(long, value_delimiter = ',')]
        mode: Option<Vec<ArrivalMode>>,

        /// Pods to include (comma separated)
        #[arg(long, value_delimiter = ',')]
        pod: Option<Vec<Pod>>,

        /// Metric emphasised in the daily trend
        #[arg(long, default_value = "door_to_provider_min")]
        metric: Metric,

        /// Metric compared across chief complaints
        #[arg(long, default_value = "length_of_stay_min")]
        bar_metric: Metric,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date_string(value, &DateFormatConfig::default())
        .ok_or_else(|| format!("unparseable date '{value}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_toml_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    debug!("Base configuration:\n{config}");

    match cli.command {
        Command::Generate {
            visits,
            start_date,
            days,
            seed,
            output,
        } => {
            let generator = &mut config.generator;
            if let Some(visits) = visits {
                generator.visits = visits;
            }
            if let Some(start_date) = start_date {
                generator.start_date = start_date;
            }
            if let Some(days) = days {
                generator.days = days;
            }
            if let Some(seed) = seed {
                generator.seed = seed;
            }
            if let Some(output) = output {
                generator.output = output;
            }
            info!("{}", config.generator);

            let started = Instant::now();
            let visits = ed_flow::generate_to_file(&config.generator, true)
                .context("generating synthetic visits")?;
            info!("Wrote {}", config.generator.output.display());
            print_table_summary(&visits, VISIT_COLUMNS.len(), started.elapsed());
            print_sample_rows(&visits, 3);
        }
        Command::Report {
            data,
            from,
            to,
            triage,
            complaint,
            mode,
            pod,
            metric,
            bar_metric,
            json,
        } => {
            if let Some(data) = data {
                config.dashboard.data_path = data;
            }
            let data_path = config.dashboard.data_path.clone();
            let mut session = DashboardSession::new(config.dashboard);

            let date_range = session
                .date_range(from, to)
                .with_context(|| format!("loading visits from {}", data_path.display()))?;
            let mut filter = session.default_filter()?.with_date_range(date_range);
            if let Some(levels) = triage {
                filter = filter.with_triage_levels(levels);
            }
            if let Some(complaints) = complaint {
                filter = filter.with_complaints(complaints);
            }
            if let Some(modes) = mode {
                filter = filter.with_arrival_modes(modes);
            }
            if let Some(pods) = pod {
                filter = filter.with_pods(pods);
            }

            let metrics = MetricSelection {
                primary: metric,
                comparison: bar_metric,
            };
            let report = session.report(&filter, metrics)?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", report.render_text());
            }
        }
    }

    Ok(())
}
