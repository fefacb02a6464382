// benchpost - platform/config.rs
//
// benchpost.toml loading with startup validation.
//
// The file is optional. When `--config` names one explicitly, every problem
// with it is fatal; when the default `benchpost.toml` is merely absent the
// built-in defaults apply.

use crate::util::constants;
use crate::util::error::ConfigError;
use std::path::{Path, PathBuf};

/// Raw deserialisable shape of benchpost.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[aggregate]` section.
    pub aggregate: AggregateSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[aggregate]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AggregateSection {
    /// Directory holding the benchmark logs and receiving the tables.
    pub data_dir: Option<String>,
    /// Protocol names, processed in this order.
    pub protocols: Option<Vec<String>>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration. `None` means "not set in the file".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// File the values came from; `None` when built-in defaults apply.
    pub source: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub protocols: Option<Vec<String>>,
    pub log_level: Option<String>,
}

/// Load the configuration.
///
/// `explicit` is the `--config` path, which must exist. Without it,
/// `benchpost.toml` in the working directory is used if present.
///
/// Runs before logging is initialised, so it does not log; the caller
/// reports `AppConfig::source` once the subscriber is installed.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(constants::CONFIG_FILE_NAME);
            if !default.exists() {
                return Ok(AppConfig::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let mut config = parse_config(&content, &path)?;
    config.source = Some(path);
    Ok(config)
}

/// Parse and validate TOML `content`. `path` is for error context.
pub fn parse_config(content: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = AppConfig::default();

    if let Some(dir) = raw.aggregate.data_dir {
        if dir.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "[aggregate] data_dir".to_string(),
                value: dir,
                expected: "a non-empty directory path".to_string(),
            });
        }
        config.data_dir = Some(PathBuf::from(dir));
    }

    if let Some(protocols) = raw.aggregate.protocols {
        validate_protocol_names(&protocols, "[aggregate] protocols")?;
        config.protocols = Some(protocols);
    }

    if let Some(level) = raw.logging.level {
        let lower = level.to_lowercase();
        if !constants::VALID_LOG_LEVELS.contains(&lower.as_str()) {
            return Err(ConfigError::Invalid {
                field: "[logging] level".to_string(),
                value: level,
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
        config.log_level = Some(lower);
    }

    Ok(config)
}

/// Check a protocol list from any source (config file or CLI).
///
/// Names end up inside file names, so path separators are rejected.
pub fn validate_protocol_names(names: &[String], field: &str) -> Result<(), ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::Invalid {
            field: field.to_string(),
            value: "[]".to_string(),
            expected: "at least one protocol name".to_string(),
        });
    }
    for name in names {
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: field.to_string(),
                value: name.clone(),
                expected: "a non-empty protocol name without path separators".to_string(),
            });
        }
    }
    Ok(())
}
