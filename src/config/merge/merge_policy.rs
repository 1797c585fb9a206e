//! Merge rules: built-in defaults beneath every other source.

use crate::ignore::DEFAULT_EXCLUDES;
use crate::views::DEFAULT_DIGEST_WIDTH;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("exclude", DEFAULT_EXCLUDES.to_vec())?
        .set_default("parallelism", 1_i64)?
        .set_default("verbose", false)?
        .set_default("output.format", "tree")?
        .set_default("output.digest_width", DEFAULT_DIGEST_WIDTH as i64)?
        .set_default("output.pretty", false)
}
