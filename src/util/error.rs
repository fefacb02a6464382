// benchpost - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every fault is fatal to the run; the chain is printed once by main.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all benchpost operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum BenchPostError {
    /// Walking the data directory failed.
    Discovery(DiscoveryError),

    /// A benchmark log could not be turned into a result row.
    Parse(ParseError),

    /// Writing an aggregated table failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for BenchPostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for BenchPostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Discovery(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to locating log files.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The data directory could not be resolved (missing, dangling link,
    /// permission denied on a parent).
    Root { path: PathBuf, source: io::Error },

    /// The data directory exists but is not a directory.
    NotADirectory { path: PathBuf },

    /// Walkdir traversal error below the root.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A symlink below the root whose target cannot be resolved.
    BrokenLink { path: PathBuf, source: io::Error },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root { path, source } => {
                write!(f, "Cannot resolve data directory '{}': {source}", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Data path '{}' is not a directory", path.display())
            }
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
            Self::BrokenLink { path, source } => {
                write!(f, "Broken symlink '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Root { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            Self::BrokenLink { source, .. } => Some(source),
            Self::NotADirectory { .. } => None,
        }
    }
}

impl From<DiscoveryError> for BenchPostError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to benchmark log parsing.
#[derive(Debug)]
pub enum ParseError {
    /// The log never contained a "Run Configuration" line.
    MissingConfiguration { file: PathBuf },

    /// The log never produced a `mean +- stddev` match on a timing line.
    MissingTiming { file: PathBuf },

    /// The last configuration line had too few fields after its label.
    ConfigurationTooShort {
        file: PathBuf,
        found: usize,
        required: usize,
    },

    /// I/O error while opening or reading a log file.
    Io { file: PathBuf, source: io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfiguration { file } => {
                write!(f, "'{}': no \"Run Configuration\" line", file.display())
            }
            Self::MissingTiming { file } => write!(
                f,
                "'{}': no \"<mean> +- <stddev>\" match on a \"seconds time elapsed\" line",
                file.display()
            ),
            Self::ConfigurationTooShort {
                file,
                found,
                required,
            } => write!(
                f,
                "'{}': configuration has {found} field(s) after the label, \
                 field index {} is out of range (need {required})",
                file.display(),
                found
            ),
            Self::Io { file, source } => {
                write!(f, "'{}': I/O error: {source}", file.display())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for BenchPostError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing aggregated tables.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error creating or flushing the output file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for BenchPostError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is not acceptable.
    Invalid {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Invalid {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is invalid. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<ConfigError> for BenchPostError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for benchpost results.
pub type Result<T> = std::result::Result<T, BenchPostError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_too_short_reports_missing_index() {
        let e = ParseError::ConfigurationTooShort {
            file: PathBuf::from("Shamir-1.log"),
            found: 3,
            required: 4,
        };
        let msg = e.to_string();
        assert!(msg.contains("Shamir-1.log"), "got: {msg}");
        assert!(msg.contains("index 3"), "got: {msg}");
    }

    #[test]
    fn test_top_level_error_preserves_chain() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let e: BenchPostError = ExportError::Io {
            path: PathBuf::from("data/Shamir_all"),
            source: io,
        }
        .into();

        assert!(e.to_string().starts_with("Export error:"));
        let export = e.source().expect("export source");
        let io = export.source().expect("io source");
        assert_eq!(io.to_string(), "denied");
    }
}
