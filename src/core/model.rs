// benchpost - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Protocol
// =============================================================================

/// A secret-sharing protocol whose benchmark logs are aggregated together.
///
/// The name doubles as the log file-name prefix (`Shamir-run3.log`) and as
/// the stem of the output table (`Shamir_all`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Protocol {
    name: String,
}

impl Protocol {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The built-in protocol list, in processing order.
    pub fn defaults() -> Vec<Protocol> {
        constants::DEFAULT_PROTOCOLS
            .iter()
            .map(|name| Protocol::new(*name))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substring a log file name must contain to belong to this protocol.
    pub fn file_marker(&self) -> String {
        format!("{}{}", self.name, constants::LOG_NAME_SEPARATOR)
    }

    /// File name of the aggregated table inside the data directory.
    pub fn output_file_name(&self) -> String {
        format!("{}{}", self.name, constants::OUTPUT_FILE_SUFFIX)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Scan captures
// =============================================================================

/// Fields of a "Run Configuration" line with the leading label removed.
///
/// The field count is not checked here; positional access happens when the
/// row is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    pub fields: Vec<String>,
}

impl Configuration {
    /// Split a configuration line on commas and drop the label.
    ///
    /// Surrounding whitespace of the line is removed first; individual fields
    /// are kept exactly as written.
    pub fn from_line(line: &str) -> Self {
        Self {
            fields: line
                .trim()
                .split(',')
                .skip(1)
                .map(str::to_string)
                .collect(),
        }
    }
}

/// A `mean +- stddev` pair, kept as the original text so no precision is lost
/// on the way to the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    pub mean: String,
    pub stddev: String,
}

// =============================================================================
// Results
// =============================================================================

/// One aggregated line: `protocol,n,t,l,avg,stddev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub protocol: String,
    pub n: String,
    pub t: String,
    pub l: String,
    pub avg: String,
    pub stddev: String,
}

impl ResultRow {
    /// Fields in output column order.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.protocol.as_str(),
            self.n.as_str(),
            self.t.as_str(),
            self.l.as_str(),
            self.avg.as_str(),
            self.stddev.as_str(),
        ]
    }
}

/// All rows gathered for one protocol, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub protocol: Protocol,
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of processing one protocol during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolSummary {
    pub protocol: Protocol,
    /// Log files located for this protocol.
    pub files_found: usize,
    /// Rows written to the output table.
    pub rows_written: usize,
    /// Path of the output table.
    pub output_path: PathBuf,
}
