// benchpost - app/aggregate.rs
//
// Run orchestration: for each protocol, locate its logs, parse each one into
// a row, and write the protocol's table.
//
// Every error is fatal and returned immediately. Tables written for earlier
// protocols stay on disk; there is no rollback.

use crate::core::discovery;
use crate::core::export;
use crate::core::model::{Protocol, ProtocolSummary, ResultTable};
use crate::core::parser;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, ParseError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Inputs for one run. Built by `main` from CLI flags, config file and
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory searched for logs; tables are written here too.
    pub data_dir: PathBuf,
    /// Protocols in processing order.
    pub protocols: Vec<Protocol>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            protocols: Protocol::defaults(),
        }
    }
}

/// Progress line printed to stdout before each log is parsed.
pub fn print_progress(path: &Path) {
    println!("parsing {}", path.display());
}

/// Run with the stdout progress printer.
pub fn run(config: &RunConfig) -> Result<Vec<ProtocolSummary>> {
    run_with_progress(config, print_progress)
}

/// Process every configured protocol in order.
///
/// `on_file` is called once per log, before it is parsed.
pub fn run_with_progress<F>(config: &RunConfig, mut on_file: F) -> Result<Vec<ProtocolSummary>>
where
    F: FnMut(&Path),
{
    tracing::info!(
        data_dir = %config.data_dir.display(),
        protocols = config.protocols.len(),
        "Aggregation starting"
    );

    let mut summaries = Vec::with_capacity(config.protocols.len());
    for protocol in &config.protocols {
        let summary = process_protocol(protocol, &config.data_dir, &mut on_file)?;
        tracing::info!(
            protocol = %summary.protocol,
            files = summary.files_found,
            rows = summary.rows_written,
            output = %summary.output_path.display(),
            "Protocol aggregated"
        );
        summaries.push(summary);
    }

    tracing::info!(protocols = summaries.len(), "Aggregation complete");
    Ok(summaries)
}

/// Locate, parse and write one protocol's table.
pub fn process_protocol<F>(
    protocol: &Protocol,
    data_dir: &Path,
    on_file: F,
) -> Result<ProtocolSummary>
where
    F: FnMut(&Path),
{
    let files = discovery::find_files(data_dir, &protocol.file_marker())?;
    let table = aggregate_logs(protocol.clone(), &files, on_file)?;
    let output_path = data_dir.join(protocol.output_file_name());
    let rows_written = write_table(&table, &output_path)?;

    Ok(ProtocolSummary {
        protocol: protocol.clone(),
        files_found: files.len(),
        rows_written,
        output_path,
    })
}

/// Parse `files` in order into one table. The first failure aborts.
pub fn aggregate_logs<F>(
    protocol: Protocol,
    files: &[PathBuf],
    mut on_file: F,
) -> std::result::Result<ResultTable, ParseError>
where
    F: FnMut(&Path),
{
    let mut table = ResultTable::new(protocol);
    for path in files {
        on_file(path);
        let reader = fs::open_log(path).map_err(|source| ParseError::Io {
            file: path.clone(),
            source,
        })?;
        table.rows.push(parser::parse_log(reader, path)?);
    }
    Ok(table)
}

/// Create or truncate `path` and write `table` into it.
pub fn write_table(table: &ResultTable, path: &Path) -> std::result::Result<usize, ExportError> {
    let mut writer = fs::create_output(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let count = export::export_csv(table, &mut writer, path)?;
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = count, "Table written");
    Ok(count)
}
