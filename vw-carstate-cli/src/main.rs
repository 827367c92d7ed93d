//! VW Car State Replay CLI
//!
//! Command-line front end for the vw-carstate library. It replays recorded
//! per-cycle signal tables (JSON lines, as produced by a CAN parser) through
//! a car state and writes the decoded vehicle state of every cycle.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use vw_carstate::{NetworkModel, ShifterValues, TransmissionType};

mod config;
mod replay;

use config::AppConfig;
use replay::Replayer;

/// VW Car State - Replay recorded signal tables into vehicle state
#[derive(Parser, Debug)]
#[command(name = "vw-carstate")]
#[command(about = "Decode recorded VW signal tables into vehicle state", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Recorded signal tables, one JSON cycle per line (can be repeated)
    #[arg(short, long, value_name = "FILE")]
    input: Vec<PathBuf>,

    /// DBC file with the gear selector value descriptions
    #[arg(long, value_name = "FILE")]
    dbc: Option<PathBuf>,

    /// Network topology: mqb, pq or unsupported
    #[arg(long, value_name = "MODEL")]
    network_model: Option<NetworkModel>,

    /// Transmission: automatic, manual, electric or unspecified
    #[arg(long, value_name = "TYPE")]
    transmission: Option<TransmissionType>,

    /// Directory for <stem>.state.jsonl outputs (default: stdout)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Pretty-print each state record
    #[arg(long)]
    pretty: bool,

    /// Maximum number of cycles to replay per file (for testing)
    #[arg(long, value_name = "COUNT")]
    max_cycles: Option<usize>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("VW Car State CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using car state library v{}", vw_carstate::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    apply_args(&mut config, &args);
    config.validate()?;

    if config.input.files.is_empty() {
        println!("VW Car State - No input specified");
        println!("\nQuick Start:");
        println!("  vw-carstate --input drive.jsonl --dbc vw_mqb_2010.dbc --transmission automatic");
        println!("  vw-carstate --config config.toml");
        println!("\nUse --help for more options");
        return Ok(());
    }

    let shifter_values = load_shifter_values(&config)?;
    let replayer = Replayer::new(config.vehicle.clone(), shifter_values)
        .with_max_cycles(args.max_cycles)
        .with_pretty(config.output.pretty);

    let results = replayer.replay_files(&config.input.files, config.output.output_dir.as_deref())?;

    let mut cycles = 0;
    let mut failed = 0;
    for (path, result) in &results {
        match result {
            Ok(summary) => cycles += summary.cycles,
            Err(e) => {
                log::error!("{:?}: {:#}", path, e);
                failed += 1;
            }
        }
    }

    log::info!(
        "Replayed {} cycles from {} of {} file(s)",
        cycles,
        results.len() - failed,
        results.len()
    );

    if failed > 0 {
        anyhow::bail!("{} of {} recordings failed", failed, results.len());
    }

    Ok(())
}

/// Command-line arguments take precedence over the config file
fn apply_args(config: &mut AppConfig, args: &Args) {
    if !args.input.is_empty() {
        config.input.files = args.input.clone();
    }
    if let Some(dbc) = &args.dbc {
        config.input.dbc_file = Some(dbc.clone());
    }
    if let Some(model) = args.network_model {
        config.vehicle.network_model = model;
    }
    if let Some(transmission) = args.transmission {
        config.vehicle.transmission = transmission;
    }
    if let Some(dir) = &args.output_dir {
        config.output.output_dir = Some(dir.clone());
    }
    if args.pretty {
        config.output.pretty = true;
    }
}

/// Load the selector value table of the configured topology
fn load_shifter_values(config: &AppConfig) -> Result<ShifterValues> {
    let Some(path) = &config.input.dbc_file else {
        return Ok(ShifterValues::new());
    };
    let Some((message, signal)) = config.vehicle.network_model.shifter_signal() else {
        return Ok(ShifterValues::new());
    };

    log::info!("Loading shifter values from: {:?}", path);
    ShifterValues::from_dbc_file(path, message, signal)
        .with_context(|| format!("Failed to load {}.{} from {:?}", message, signal, path))
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
