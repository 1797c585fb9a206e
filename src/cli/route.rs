//! CLI route: run context. Loads configuration, applies flags, builds the
//! tree and renders it.

use crate::cli::parse::Cli;
use crate::config::{validation_failure, ConfigLoader, DigestConfig, OutputConfig, OutputFormat};
use crate::error::DigestError;
use crate::ignore::DEFAULT_EXCLUDES;
use crate::tree::{DigestNode, TreeBuilder};
use crate::views;
use std::path::{Path, PathBuf};

/// Runtime context for one invocation: the root to digest and the fully
/// merged configuration.
pub struct RunContext {
    root: PathBuf,
    config: DigestConfig,
}

impl RunContext {
    /// Load configuration (explicit file or global), then apply command-line
    /// flags on top and validate the result.
    pub fn new(cli: &Cli) -> Result<Self, DigestError> {
        let mut config = match cli.config {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        apply_overrides(&mut config, cli);
        config
            .validate()
            .map_err(|errors| validation_failure(&errors))?;

        Ok(Self::from_config(cli.root.clone(), config))
    }

    pub fn from_config(root: PathBuf, config: DigestConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// Build the digest tree and render it per the output configuration.
    pub fn execute(&self) -> Result<String, DigestError> {
        let options = self.config.builder_options()?;
        let tree = TreeBuilder::new(&self.root).with_options(options).build()?;
        render(&tree, &self.config.output)
    }
}

/// Render a finished tree. The result always ends with a newline.
pub fn render(tree: &DigestNode, output: &OutputConfig) -> Result<String, DigestError> {
    match output.format {
        OutputFormat::Tree => Ok(views::render_indented(tree, output.digest_width)),
        OutputFormat::Json => {
            let mut json = views::to_json(tree, output.pretty)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Command-line flags win over every configuration source.
fn apply_overrides(config: &mut DigestConfig, cli: &Cli) {
    if cli.no_default_excludes {
        config
            .exclude
            .retain(|pattern| !DEFAULT_EXCLUDES.contains(&pattern.as_str()));
    }
    config.exclude.extend(cli.exclude.iter().cloned());

    if let Some(jobs) = cli.jobs {
        config.parallelism = jobs;
    }
    if cli.verbose {
        config.verbose = true;
        config.logging.level = "debug".to_string();
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }
    if cli.pretty {
        config.output.pretty = true;
    }
    if let Some(width) = cli.digest_width {
        config.output.digest_width = width;
    }

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.logging.file = file.clone();
    }
}
