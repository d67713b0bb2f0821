//! RRG CLI: run the rotation engine and print signals.
//!
//! Commands:
//! - `run`: load a wide price CSV, run every column against a benchmark
//! - `demo`: same pipeline over a deterministic synthetic sector universe
//! - `config`: print the default configuration as TOML

mod logging;
mod output;
mod prices;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use rrg_core::data::{synthetic_series, synthetic_universe, SyntheticSpec};
use rrg_core::domain::InstrumentId;
use rrg_core::{RotationEngine, RrgConfig, RunReport};

use output::{write_report, OutputFormat};

const DEFAULT_SECTORS: &[&str] = &[
    "XLB", "XLC", "XLE", "XLF", "XLI", "XLK", "XLP", "XLRE", "XLU", "XLV", "XLY",
];

#[derive(Parser)]
#[command(name = "rrg", about = "RRG: relative rotation classification and signals")]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine over a wide price CSV (date,SYM1,SYM2,...).
    Run {
        /// Price file.
        #[arg(long)]
        prices: PathBuf,

        /// Benchmark column (e.g., SPY).
        #[arg(long)]
        benchmark: String,

        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Only print the most recent date.
        #[arg(long, default_value_t = false)]
        latest: bool,
    },
    /// Run the engine over synthetic sector data.
    Demo {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Trading days to generate.
        #[arg(long, default_value_t = 500)]
        days: usize,

        /// Symbols to generate. Defaults to the eleven SPDR sectors.
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Only print the most recent date.
        #[arg(long, default_value_t = false)]
        latest: bool,
    },
    /// Print the default configuration.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json);

    match cli.command {
        Commands::Run {
            prices,
            benchmark,
            config,
            format,
            latest,
        } => {
            let report = run_prices(&prices, &benchmark, config.as_deref())?;
            emit(&report, format, latest)
        }
        Commands::Demo {
            seed,
            days,
            symbols,
            config,
            format,
            latest,
        } => {
            let report = run_demo(seed, days, &symbols, config.as_deref())?;
            emit(&report, format, latest)
        }
        Commands::Config => {
            print!("{}", RrgConfig::default().to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RrgConfig> {
    match path {
        Some(path) => {
            let config = RrgConfig::from_file(path)?;
            info!(path = %path.display(), fingerprint = %config.fingerprint(), "config loaded");
            Ok(config)
        }
        None => Ok(RrgConfig::default()),
    }
}

fn run_prices(prices: &Path, benchmark: &str, config: Option<&Path>) -> Result<RunReport> {
    let config = load_config(config)?;
    let provider = prices::load_wide_csv(prices)?;
    let benchmark = InstrumentId::new(benchmark);

    let mut engine = RotationEngine::new(config)?;
    engine
        .run_provider(&provider, &benchmark)
        .with_context(|| format!("benchmark column '{benchmark}'"))
}

fn run_demo(
    seed: u64,
    days: usize,
    symbols: &[String],
    config: Option<&Path>,
) -> Result<RunReport> {
    let config = load_config(config)?;
    let min_days = config.relative_strength.slow_window + config.relative_strength.momentum_window;
    if days < min_days {
        bail!("--days must be at least {min_days} for the configured windows");
    }

    let spec = SyntheticSpec {
        days,
        seed,
        ..SyntheticSpec::default()
    };
    let symbols: Vec<&str> = if symbols.is_empty() {
        DEFAULT_SECTORS.to_vec()
    } else {
        symbols.iter().map(String::as_str).collect()
    };

    let benchmark = synthetic_series("SPY", &spec)?;
    let universe = synthetic_universe(&symbols, &spec)?;

    let mut engine = RotationEngine::new(config)?;
    Ok(engine.run(&benchmark, &universe))
}

fn emit(report: &RunReport, format: OutputFormat, latest: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format, latest)
}
