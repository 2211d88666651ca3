//! Monte-Carlo bucket frequency simulator
//!
//! Prints `label<TAB>frequency` for the four buckets.

use std::io::{self, Write};
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use strum::IntoEnumIterator;
use tracing::debug;

use pb_core::logging::init_tracing;
use pb_core::report::{write_frequencies, write_frequencies_json};
use pb_core::{SamplerKind, SimConfig, expected_frequencies, simulate};

fn parse_sampler(name: &str) -> Result<SamplerKind, String> {
    SamplerKind::from_str(name).map_err(|_| {
        let known: Vec<String> = SamplerKind::iter().map(|k| k.to_string()).collect();
        format!("unknown sampler '{}' (expected one of: {})", name, known.join(", "))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
}

/// Tally bucket frequencies over random trials
#[derive(Parser, Debug)]
#[command(name = "probabilities")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of trials (defaults to 1e11 for uniform, 1e7 for permutation)
    #[arg(short = 'n', long = "trials")]
    trials: Option<u64>,

    /// How the order draw is sampled (uniform, permutation)
    #[arg(short = 's', long = "sampler", value_parser = parse_sampler, default_value_t = SamplerKind::Uniform)]
    sampler: SamplerKind,

    /// Seed for a reproducible run
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Split trials across this many parallel workers
    #[arg(short = 'j', long = "workers")]
    workers: Option<usize>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print exact probabilities instead of simulating
    #[arg(long = "expected", conflicts_with_all = ["trials", "sampler", "seed", "workers"])]
    expected: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig::new(self.sampler);
        if let Some(trials) = self.trials {
            config = config.with_trials(trials);
        }
        config.seed = self.seed;
        config.workers = self.workers;
        config
    }
}

fn render<W: Write>(args: &Args, out: &mut W) -> pb_core::Result<()> {
    if args.expected {
        return match args.format {
            Format::Text => write_frequencies(out, expected_frequencies()),
            Format::Json => write_frequencies_json(out, expected_frequencies()),
        };
    }

    let config = args.config();
    let report = simulate(&config)?;
    debug!(seed = report.seed, "report ready");

    match args.format {
        Format::Text => report.write_text(out),
        Format::Json => report.write_json(out),
    }
}

fn run(args: &Args) -> pb_core::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(args, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("probabilities: {}", e);
            ExitCode::FAILURE
        }
    }
}
