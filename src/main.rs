// benchpost - main.rs
//
// Binary entry point. Handles:
// 1. CLI argument parsing
// 2. Config file loading
// 3. Logging initialisation (debug mode support)
// 4. The aggregation run and exit status

use benchpost::app::aggregate::{self, RunConfig};
use benchpost::core::model::Protocol;
use benchpost::platform::config;
use benchpost::util::{self, error::BenchPostError};
use clap::Parser;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// benchpost - aggregate secret-sharing benchmark logs.
///
/// Finds `<Protocol>-*` logs under the data directory, extracts each run's
/// configuration and `mean +- stddev` elapsed time, and writes one
/// header-less CSV per protocol as `<Protocol>_all` in the same directory.
#[derive(Parser, Debug)]
#[command(name = "benchpost", version, about)]
struct Cli {
    /// Data directory to scan and write into [default: data].
    data_dir: Option<PathBuf>,

    /// Protocol to aggregate; repeat to process several, in order.
    #[arg(short = 'p', long = "protocol")]
    protocols: Vec<String>,

    /// Config file [default: ./benchpost.toml when present].
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nowhere left to report a failed write to stderr.
            let _ = write_error_chain(&e, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

/// Print `error` and each of its causes, one per line.
fn write_error_chain<W: Write>(error: &dyn Error, out: &mut W) -> io::Result<()> {
    writeln!(out, "Error: {error}")?;
    let mut source = error.source();
    while let Some(cause) = source {
        writeln!(out, "  caused by: {cause}")?;
        source = cause.source();
    }
    Ok(())
}

fn try_main(cli: Cli) -> Result<(), BenchPostError> {
    let file_config = config::load_config(cli.config.as_deref())?;

    util::logging::init(cli.debug, file_config.log_level.as_deref());
    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "benchpost starting"
    );
    match &file_config.source {
        Some(path) => tracing::info!(path = %path.display(), "Loaded config file"),
        None => tracing::debug!(
            path = util::constants::CONFIG_FILE_NAME,
            "No config file found; using defaults"
        ),
    }

    let run_config = resolve_run_config(cli, file_config)?;
    aggregate::run(&run_config)?;
    Ok(())
}

/// Merge settings: CLI > config file > built-in default.
fn resolve_run_config(cli: Cli, file: config::AppConfig) -> Result<RunConfig, BenchPostError> {
    let defaults = RunConfig::default();

    let data_dir = cli.data_dir.or(file.data_dir).unwrap_or(defaults.data_dir);

    let protocols = if !cli.protocols.is_empty() {
        config::validate_protocol_names(&cli.protocols, "--protocol")?;
        cli.protocols.into_iter().map(Protocol::new).collect()
    } else if let Some(names) = file.protocols {
        names.into_iter().map(Protocol::new).collect()
    } else {
        defaults.protocols
    };

    Ok(RunConfig {
        data_dir,
        protocols,
    })
}
