// benchpost - util/constants.rs
//
// Single source of truth for named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "benchpost";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Run defaults
// =============================================================================

/// Data directory scanned when neither the CLI nor the config file names one.
/// Relative paths resolve against the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Protocols processed, in order, when none are configured.
pub const DEFAULT_PROTOCOLS: &[&str] = &["AsmuthBloom", "Blakely", "Shamir"];

/// Appended to a protocol name to form the log file-name marker
/// (`Shamir` -> `Shamir-`).
pub const LOG_NAME_SEPARATOR: char = '-';

/// Appended to a protocol name to form the output file name
/// (`Shamir` -> `Shamir_all`).
pub const OUTPUT_FILE_SUFFIX: &str = "_all";

// =============================================================================
// Log format markers
// =============================================================================

/// Substring identifying the experiment configuration line.
pub const RUN_CONFIGURATION_MARKER: &str = "Run Configuration";

/// Substring identifying the `perf stat` elapsed-time summary line.
pub const TIMING_MARKER: &str = "seconds time elapsed";

/// `<mean> +- <stddev>`; the dot is literal, so integer values do not match.
pub const TIMING_PATTERN: &str = r"(\d+\.\d+) \+- (\d+\.\d+)";

/// Configuration fields consumed after the label: protocol, n, t, l.
pub const CONFIGURATION_FIELDS: usize = 4;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in trace output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file looked up in the working directory when `--config` is
/// not given.
pub const CONFIG_FILE_NAME: &str = "benchpost.toml";
