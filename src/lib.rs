pub mod calibrate;
pub mod hasher;
pub mod report;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use calibrate::{calibrate, CalibrationConfig};
use hasher::BcryptHasher;
use report::{report_filename, FileReporter, Reporter};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Title of the benchmark run, used to derive the report filename
    #[arg(default_value = "Hashing Benchmark")]
    pub title: String,

    /// Timed samples averaged per cost value
    #[arg(long, default_value_t = 10)]
    pub iterations: u32,

    /// Cost value the search starts at
    #[arg(long, default_value_t = 9)]
    pub min_cost: u32,

    /// Minimum average hashing time to reach, in milliseconds
    #[arg(long, default_value_t = 250)]
    pub target_ms: u64,

    /// Plaintext hashed on every sample
    #[arg(long, default_value = "This is a test password")]
    pub password: String,
}

pub fn run(args: Args) -> Result<()> {
    let config = CalibrationConfig {
        iterations_per_round: args.iterations,
        minimum_cost: args.min_cost,
        target_nanos: args.target_ms * 1_000_000,
        fixed_input: args.password,
    };
    // Fail fast before the report file is even created.
    config.validate()?;

    let title = args.title.trim().to_string();
    let report_path = report_filename(&title);
    let reporter = FileReporter::create(Path::new(&report_path))?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    reporter.write_line(&format!("[{}] Starting benchmark {}", timestamp, title))?;
    reporter.write_line(&format!(
        "Iterations for average calculation: {}",
        config.iterations_per_round
    ))?;
    reporter.write_line(&format!("Minimum salting rounds: {}", config.minimum_cost))?;
    reporter.write_line(&format!("Minimum hashing time: {} ns", config.target_nanos))?;
    reporter.write_line("")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Calibrating bcrypt cost, starting at {} (target {} ms)...",
        config.minimum_cost, args.target_ms
    ));

    let outcome = calibrate(&config, &BcryptHasher, &reporter)?;

    pb.finish_with_message(format!(
        "Calibration finished after {} rounds.",
        outcome.history.len()
    ));

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    reporter.write_line(&format!("[{}] Stopping benchmark {}", timestamp, title))?;

    println!("Recommended number of rounds: {}", outcome.final_cost);
    println!("Report written to {}", report_path);
    Ok(())
}
