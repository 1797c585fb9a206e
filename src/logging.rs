//! Logging System
//!
//! Structured logging built on `tracing`. Log records go to stderr by default
//! so that stdout carries only digest output. Timestamps are UTC with
//! millisecond precision.

use crate::error::DigestError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Timestamp layout for log lines, e.g. 2023-03-18T14:48:04.813Z
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file")
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Enable colored output (text format, terminal outputs only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    directories::ProjectDirs::from("", "", "dirdigest")
        .map(|dirs| dirs.data_local_dir().join("dirdigest.log"))
        .unwrap_or_else(|| PathBuf::from("dirdigest.log"))
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Check level, format and output values without initializing anything
    pub fn validate(&self) -> Result<(), String> {
        validate_level(&self.level)?;
        for (module, level) in &self.modules {
            validate_level(level).map_err(|e| format!("module '{}': {}", module, e))?;
        }
        validate_format(&self.format)?;
        parse_output(&self.output)?;
        Ok(())
    }
}

/// Levels accepted in `level` and `modules`
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Log destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (DIRDIGEST_LOG, DIRDIGEST_LOG_FORMAT, DIRDIGEST_LOG_OUTPUT)
/// 2. The given configuration (already merged from CLI flags and config files)
/// 3. Defaults
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), DigestError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true) && output != Output::File;

    let writer = match output {
        Output::Stdout => BoxMakeWriter::new(std::io::stdout),
        Output::Stderr => BoxMakeWriter::new(std::io::stderr),
        Output::File => {
            let log_file = config.map(|c| c.file.clone()).unwrap_or_else(default_log_file);
            if let Some(parent) = log_file.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DigestError::Config(format!("Failed to create log directory: {}", e))
                    })?;
                }
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .map_err(|e| {
                    DigestError::Config(format!(
                        "Failed to open log file {:?}: {}",
                        log_file, e
                    ))
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    let timer = ChronoUtc::new(LOG_TIMESTAMP_FORMAT.to_string());
    let base_subscriber = Registry::default().with(filter);

    // A subscriber may already be installed (tests, embedding); keep it
    let _ = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(timer)
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(timer)
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    Ok(())
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, DigestError> {
    if let Ok(filter) = EnvFilter::try_from_env("DIRDIGEST_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    validate_level(level).map_err(DigestError::Config)?;

    if level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(level)
        .map_err(|e| DigestError::Config(format!("Invalid log level '{}': {}", level, e)))?;

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            validate_level(module_level).map_err(DigestError::Config)?;
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| DigestError::Config(format!("Invalid log directive: {}", e)))?,
            );
        }
    }

    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, DigestError> {
    select_format(std::env::var("DIRDIGEST_LOG_FORMAT").ok(), config)
}

fn select_format(
    from_env: Option<String>,
    config: Option<&LoggingConfig>,
) -> Result<String, DigestError> {
    if let Some(format) = from_env {
        validate_format(&format)
            .map_err(|e| DigestError::Config(format!("DIRDIGEST_LOG_FORMAT: {}", e)))?;
        return Ok(format);
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    validate_format(format).map_err(DigestError::Config)?;
    Ok(format.to_string())
}

fn validate_level(level: &str) -> Result<(), String> {
    if LOG_LEVELS.iter().any(|known| known.eq_ignore_ascii_case(level)) {
        Ok(())
    } else {
        Err(format!(
            "Invalid log level: {} (must be one of {})",
            level,
            LOG_LEVELS.join(", ")
        ))
    }
}

fn validate_format(format: &str) -> Result<(), String> {
    if format == "json" || format == "text" {
        Ok(())
    } else {
        Err(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        ))
    }
}

/// Determine output destination from config or environment
fn determine_output(config: Option<&LoggingConfig>) -> Result<Output, DigestError> {
    select_output(std::env::var("DIRDIGEST_LOG_OUTPUT").ok(), config)
}

fn select_output(
    from_env: Option<String>,
    config: Option<&LoggingConfig>,
) -> Result<Output, DigestError> {
    if let Some(output) = from_env {
        return parse_output(&output)
            .map_err(|e| DigestError::Config(format!("DIRDIGEST_LOG_OUTPUT: {}", e)));
    }

    let output = config.map(|c| c.output.as_str()).unwrap_or("stderr");
    parse_output(output).map_err(DigestError::Config)
}

fn parse_output(output: &str) -> Result<Output, String> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(format!(
            "Invalid log output: {} (must be 'stderr', 'stdout' or 'file')",
            output
        )),
    }
}
