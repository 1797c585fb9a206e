//! Config loader: assembles the layered sources and validates the result.

use super::merge::merge_policy;
use super::sources::{environment, global_file};
use super::{validation_failure, DigestConfig};
use crate::error::DigestError;
use config::File;
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults, the global config file and the
    /// environment.
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables (DIRDIGEST__*)
    /// 2. Global config file ($XDG_CONFIG_HOME/dirdigest/config.toml)
    /// 3. Defaults
    pub fn load() -> Result<DigestConfig, DigestError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Load configuration from an explicit file instead of the global one.
    ///
    /// The file must exist. Environment variables still override it.
    pub fn load_from_file(path: &Path) -> Result<DigestConfig, DigestError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<DigestConfig, DigestError> {
        let config: DigestConfig = builder.build()?.try_deserialize()?;
        config
            .validate()
            .map_err(|errors| validation_failure(&errors))?;
        Ok(config)
    }
}
