//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file (or an
//! explicit one), then `DIRDIGEST__SECTION__KEY` environment variables. The
//! binary applies its command-line flags on top of the loaded result.

use crate::error::DigestError;
use crate::ignore::{ExclusionSet, DEFAULT_EXCLUDES};
use crate::logging::LoggingConfig;
use crate::tree::BuilderOptions;
use crate::views::DEFAULT_DIGEST_WIDTH;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Base-name glob patterns skipped at every depth
    pub exclude: Vec<String>,

    /// Sibling parallelism: 1 = sequential, 0 = all cores
    pub parallelism: usize,

    /// Per-entry progress logging
    pub verbose: bool,

    /// Output rendering
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect(),
            parallelism: 1,
            verbose: false,
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// How the finished tree is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented, column-aligned text tree
    Tree,
    /// Flat pre-order JSON list
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Characters of hex digest shown in the tree view (64 = full digest)
    pub digest_width: usize,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Tree,
            digest_width: DEFAULT_DIGEST_WIDTH,
            pretty: false,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.digest_width < 2 {
            return Err(format!(
                "digest_width must be at least 2, got {}",
                self.digest_width
            ));
        }
        if self.digest_width < 64 && self.digest_width % 2 != 0 {
            return Err(format!(
                "digest_width must be even below 64, got {}",
                self.digest_width
            ));
        }
        Ok(())
    }
}

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Exclude(String, String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Exclude(pattern, msg) => {
                write!(f, "Exclude pattern '{}': {}", pattern, msg)
            }
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl DigestConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for pattern in &self.exclude {
            if let Err(e) = glob::Pattern::new(pattern) {
                errors.push(ValidationError::Exclude(pattern.clone(), e.to_string()));
            }
        }

        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Options for [`crate::tree::TreeBuilder`]
    pub fn builder_options(&self) -> Result<BuilderOptions, DigestError> {
        Ok(BuilderOptions {
            exclusions: ExclusionSet::new(&self.exclude)?,
            parallelism: self.parallelism,
            verbose: self.verbose,
        })
    }
}

/// Join validation errors into a single configuration error
pub(crate) fn validation_failure(errors: &[ValidationError]) -> DigestError {
    let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    DigestError::Config(format!(
        "Configuration validation failed:\n{}",
        msgs.join("\n")
    ))
}
