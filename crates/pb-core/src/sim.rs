//! Trial loops
//!
//! A run draws `trials` independent trials and tallies their buckets, either
//! on one generator or split across rayon workers that each own a distinct
//! ChaCha stream of the run seed.

use std::time::Instant;

use pb_rng::TrialRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{Result, SimError};
use crate::report::Report;
use crate::sampler::SamplerKind;
use crate::tally::Tally;

/// Parameters of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of trials
    pub trials: u64,
    /// How trials are drawn
    pub sampler: SamplerKind,
    /// Run seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Parallel partitions; `None` runs on the calling thread
    pub workers: Option<usize>,
}

impl SimConfig {
    /// Config for a sampler with its default trial count
    pub fn new(sampler: SamplerKind) -> Self {
        Self {
            trials: sampler.default_trials(),
            sampler,
            seed: None,
            workers: None,
        }
    }

    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(SimError::ZeroWorkers);
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(SamplerKind::default())
    }
}

/// Run `trials` trials on one generator
pub fn run_sequential(sampler: SamplerKind, trials: u64, rng: &mut TrialRng) -> Tally {
    let mut tally = Tally::new();
    for _ in 0..trials {
        tally.record(sampler.draw(rng));
    }
    tally
}

/// Split `trials` into `workers` partitions and sum their tallies.
///
/// Partition `i` draws from stream `i` of `seed`. The first
/// `trials % workers` partitions take one extra trial.
pub fn run_parallel(sampler: SamplerKind, trials: u64, seed: u64, workers: usize) -> Result<Tally> {
    if workers == 0 {
        return Err(SimError::ZeroWorkers);
    }
    let base = trials / workers as u64;
    let extra = trials % workers as u64;

    let tally = (0..workers)
        .into_par_iter()
        .map(|i| {
            let share = base + u64::from((i as u64) < extra);
            let mut rng = TrialRng::with_stream(seed, i as u64);
            let tally = run_sequential(sampler, share, &mut rng);
            trace!(partition = i, stream = rng.stream(), trials = share, "partition done");
            tally
        })
        .reduce(Tally::new, |a, b| a + b);

    Ok(tally)
}

/// Run a configured simulation and package the result
pub fn simulate(config: &SimConfig) -> Result<Report> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand_seed);
    debug!(
        sampler = %config.sampler,
        trials = config.trials,
        seed,
        workers = ?config.workers,
        "starting simulation"
    );

    let start = Instant::now();
    let tally = match config.workers {
        Some(workers) => run_parallel(config.sampler, config.trials, seed, workers)?,
        None => run_sequential(config.sampler, config.trials, &mut TrialRng::new(seed)),
    };
    info!(
        trials = tally.total(),
        elapsed = ?start.elapsed(),
        "simulation finished"
    );

    Ok(Report {
        sampler: config.sampler,
        seed,
        tally,
    })
}

fn rand_seed() -> u64 {
    TrialRng::from_entropy().seed()
}
