//! Search loop that finds the bcrypt cost whose average hashing time best
//! approaches a target duration.
//!
//! Starting at a minimum cost, each round takes a fixed number of timed
//! samples, averages them, and logs the measurements. The cost is bumped
//! by one until the average meets the target; the recommendation then
//! falls back to the previous cost if its average landed closer to the
//! target than the one that first crossed it.

use crate::hasher::{Hasher, MAX_COST, MIN_COST};
use crate::report::Reporter;
use anyhow::{bail, Result};

#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    /// Timed samples averaged per cost value.
    pub iterations_per_round: u32,
    /// Cost value the search starts at.
    pub minimum_cost: u32,
    /// Minimum average hashing time to reach.
    pub target_nanos: u64,
    /// Plaintext hashed on every sample. Content is irrelevant, but it
    /// must stay the same across the run so rounds are comparable.
    pub fixed_input: String,
}

impl CalibrationConfig {
    /// Rejects configurations the loop cannot run with, before any
    /// measurement happens or report output is produced.
    pub fn validate(&self) -> Result<()> {
        if self.iterations_per_round == 0 {
            bail!("Iterations per round must be at least 1");
        }
        if self.target_nanos == 0 {
            bail!("Target hashing time must be positive");
        }
        if self.minimum_cost < MIN_COST || self.minimum_cost > MAX_COST {
            bail!(
                "Minimum cost {} is outside the supported range {}..={}",
                self.minimum_cost,
                MIN_COST,
                MAX_COST
            );
        }
        if self.fixed_input.is_empty() {
            bail!("Fixed input must not be empty");
        }
        Ok(())
    }
}

/// Timing measurements for one cost value.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub cost: u32,
    /// Elapsed nanoseconds per sample, in measurement order.
    pub samples: Vec<u64>,
    pub average_nanos: f64,
}

#[derive(Debug)]
pub struct CalibrationOutcome {
    pub final_cost: u32,
    pub history: Vec<RoundResult>,
}

/// Rounds nanoseconds to whole milliseconds, half up.
fn to_millis(nanos: f64) -> i64 {
    (nanos / 1_000_000.0).round() as i64
}

/// Runs the calibration search and returns the recommended cost along
/// with the full measurement history.
///
/// Every sample is taken exactly once; slow or anomalous samples are
/// neither repeated nor discarded. A hasher or reporter failure aborts
/// the run, leaving the rounds already reported in the sink.
pub fn calibrate(
    config: &CalibrationConfig,
    hasher: &dyn Hasher,
    reporter: &dyn Reporter,
) -> Result<CalibrationOutcome> {
    config.validate()?;

    let mut history: Vec<RoundResult> = Vec::new();
    let mut cost = config.minimum_cost;

    loop {
        let round = measure_round(config, hasher, cost)?;
        report_round(reporter, &round)?;

        let target_met = round.average_nanos >= config.target_nanos as f64;
        history.push(round);
        if target_met {
            break;
        }
        cost += 1;
    }

    let last = history.len() - 1;
    let mut final_cost = history[last].cost;

    // The previous cost wins if its average landed strictly closer to the
    // target. Only the last two rounds are compared, not the whole history.
    if history.len() > 1 {
        let target = config.target_nanos as f64;
        let last_dist = (history[last].average_nanos - target).abs();
        let prev_dist = (history[last - 1].average_nanos - target).abs();
        if prev_dist < last_dist {
            final_cost -= 1;
        }
    }

    reporter.write_line(&format!("Recommended number of rounds: {}", final_cost))?;

    Ok(CalibrationOutcome {
        final_cost,
        history,
    })
}

/// Takes `iterations_per_round` timed samples at the given cost. Only the
/// hash call itself sits inside the measurement window.
fn measure_round(
    config: &CalibrationConfig,
    hasher: &dyn Hasher,
    cost: u32,
) -> Result<RoundResult> {
    let mut samples = Vec::with_capacity(config.iterations_per_round as usize);
    for _ in 0..config.iterations_per_round {
        let elapsed = hasher.hash(cost, &config.fixed_input)?;
        samples.push(elapsed.as_nanos() as u64);
    }

    let average_nanos = samples.iter().sum::<u64>() as f64 / samples.len() as f64;

    Ok(RoundResult {
        cost,
        samples,
        average_nanos,
    })
}

/// Writes one round's block: header, numbered samples, blank line,
/// average, separator.
fn report_round(reporter: &dyn Reporter, round: &RoundResult) -> Result<()> {
    reporter.write_line(&format!("Number of rounds: {}", round.cost))?;
    for (i, sample) in round.samples.iter().enumerate() {
        reporter.write_line(&format!(
            "{} {} ns; {} ms",
            i,
            sample,
            to_millis(*sample as f64)
        ))?;
    }
    reporter.write_line("")?;
    reporter.write_line(&format!(
        "Average: {} ns; {} ms",
        round.average_nanos,
        to_millis(round.average_nanos)
    ))?;
    reporter.write_line("---------------------")?;
    Ok(())
}
