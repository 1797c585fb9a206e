//! Global config file source: $XDG_CONFIG_HOME/dirdigest/config.toml or
//! ~/.config/dirdigest/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dirdigest").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_config_path().filter(|path| path.exists()) {
        let canonical = path.canonicalize().unwrap_or(path);
        builder = builder.add_source(File::from(canonical).required(false));
    }
    Ok(builder)
}
