//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line flags.

use numlab_core::math::roots::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_PERCENT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Largest number of decimals worth printing for an `f64`.
pub const MAX_PRECISION: usize = 17;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown output format name.
    #[error("Invalid output format: {0}. Must be one of: text, json")]
    InvalidOutputFormat(String),

    /// Negative or non-finite tolerance.
    #[error("Invalid tolerance: {0}. Must be finite and non-negative")]
    InvalidTolerance(f64),

    /// Zero iteration cap.
    #[error("Invalid iteration cap: must be greater than zero")]
    InvalidMaxIterations,

    /// Too many decimal places.
    #[error("Invalid precision: {0}. Must be at most {MAX_PRECISION}")]
    InvalidPrecision(usize),

    /// The config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// An environment variable holds an unparsable value.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels accepted by `--log-level` and `NUMLAB_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including per-iteration steps
    Trace,
    /// Per-iteration steps
    Debug,
    /// Results
    Info,
    /// Non-convergence and degenerate inputs
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned step tables and a summary line
    #[default]
    Text,
    /// The result structures as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Effective configuration of one `numlab` invocation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default stopping tolerance of the root finders, in percent
    pub tolerance_percent: f64,
    /// Iteration cap of the root finders
    pub max_iterations: usize,
    /// Output format
    #[serde(deserialize_with = "deserialize_output")]
    pub output: OutputFormat,
    /// Decimal places in text output
    pub precision: usize,
    /// Log level used when `RUST_LOG` is not set
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_output<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            output: OutputFormat::Text,
            precision: 6,
            log_level: LogLevel::Warn,
        }
    }
}

/// Environment variable names, in the order they are applied
pub const ENV_TOLERANCE: &str = "NUMLAB_TOLERANCE";
/// See [`ENV_TOLERANCE`]
pub const ENV_MAX_ITERATIONS: &str = "NUMLAB_MAX_ITERATIONS";
/// See [`ENV_TOLERANCE`]
pub const ENV_OUTPUT: &str = "NUMLAB_OUTPUT";
/// See [`ENV_TOLERANCE`]
pub const ENV_PRECISION: &str = "NUMLAB_PRECISION";
/// See [`ENV_TOLERANCE`]
pub const ENV_LOG_LEVEL: &str = "NUMLAB_LOG_LEVEL";

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from variables visible through `lookup`.
    ///
    /// Only variables that are set are applied.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_TOLERANCE) {
            self.tolerance_percent = parse_env(ENV_TOLERANCE, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_ITERATIONS) {
            self.max_iterations = parse_env(ENV_MAX_ITERATIONS, &value)?;
        }
        if let Some(value) = lookup(ENV_OUTPUT) {
            self.output = OutputFormat::from_str(&value)?;
        }
        if let Some(value) = lookup(ENV_PRECISION) {
            self.precision = parse_env(ENV_PRECISION, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&value)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(tolerance) = cli.tolerance_percent {
            self.tolerance_percent = tolerance;
        }
        if let Some(max_iterations) = cli.max_iterations {
            self.max_iterations = max_iterations;
        }
        if let Some(output) = &cli.output {
            self.output = OutputFormat::from_str(output)?;
        }
        if let Some(precision) = cli.precision {
            self.precision = precision;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if cli.verbose && self.log_level != LogLevel::Trace {
            self.log_level = LogLevel::Debug;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance_percent.is_finite() || self.tolerance_percent < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance_percent));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidMaxIterations);
        }
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision(self.precision));
        }
        Ok(())
    }

    /// Root-finder settings, with an optional per-command tolerance.
    pub fn solver_config(&self, tolerance_percent: Option<f64>) -> Result<SolverConfig, ConfigError> {
        let tolerance = tolerance_percent.unwrap_or(self.tolerance_percent);
        SolverConfig::new(tolerance, self.max_iterations)
            .map_err(|_| ConfigError::InvalidTolerance(tolerance))
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not a valid value", name, value)))
}

/// Global command-line overrides
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Tolerance override
    pub tolerance_percent: Option<f64>,
    /// Iteration cap override
    pub max_iterations: Option<usize>,
    /// Output format override
    pub output: Option<String>,
    /// Precision override
    pub precision: Option<usize>,
    /// Log level override
    pub log_level: Option<String>,
    /// Shorthand for `--log-level debug`
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
