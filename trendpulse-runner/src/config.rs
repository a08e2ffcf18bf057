//! Run configuration: YAML file → validated `RunConfig`.
//!
//! Parsing is two-step. The file is first read into a permissive
//! `RawRunConfig` whose fields are all optional (unknown keys are ignored),
//! then a single `validate` call turns it into a `RunConfig` or reports which
//! rule failed. Type errors inside the YAML (a string seed, a negative window)
//! are parse failures, not structure failures.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;
use trendpulse_core::SeedScope;

/// Version reported when the config does not provide one (or could not be read).
pub const UNKNOWN_VERSION: &str = "unknown";

/// Errors from loading the run configuration.
///
/// Every unreadable variant shares one message; the underlying cause is kept as
/// the error source.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing or invalid config file")]
    Io(#[from] std::io::Error),

    #[error("Missing or invalid config file")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing or invalid config file")]
    NotAMapping,

    #[error("Invalid config structure")]
    Invalid { version: String },
}

impl ConfigError {
    /// True when the file could not be read or parsed at all.
    pub fn is_unreadable(&self) -> bool {
        !matches!(self, ConfigError::Invalid { .. })
    }

    /// Version recovered before the failure, or `"unknown"`.
    pub fn version(&self) -> &str {
        match self {
            ConfigError::Invalid { version } => version,
            _ => UNKNOWN_VERSION,
        }
    }
}

/// Validated configuration for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Carried for reproducibility; see [`RunConfig::seed_scope`].
    pub seed: u64,
    /// Trailing window of the rolling mean, always >= 1.
    pub window: usize,
    pub version: String,
}

impl RunConfig {
    /// Randomness source for this run. No pipeline stage draws from it.
    pub fn seed_scope(&self) -> SeedScope {
        SeedScope::new(self.seed)
    }
}

/// Config as written on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawRunConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    window: Option<usize>,
    #[serde(default)]
    version: Option<Value>,
}

impl RawRunConfig {
    fn validate(self) -> Result<RunConfig, ConfigError> {
        let version = version_label(self.version);
        match (self.seed, self.window) {
            (Some(seed), Some(window)) if window >= 1 => Ok(RunConfig {
                seed,
                window,
                version,
            }),
            _ => Err(ConfigError::Invalid { version }),
        }
    }
}

/// Render the `version` key as text. Non-scalar values count as absent.
fn version_label(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => UNKNOWN_VERSION.to_string(),
    }
}

/// Load and validate a run configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let doc: Value = serde_yaml::from_str(&text)?;
    if !doc.is_mapping() {
        return Err(ConfigError::NotAMapping);
    }
    let raw: RawRunConfig = serde_yaml::from_value(doc)?;
    raw.validate()
}
