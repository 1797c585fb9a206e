//! Environment source: DIRDIGEST__<SECTION>__<KEY>
//!
//! `DIRDIGEST__PARALLELISM=4`, `DIRDIGEST__OUTPUT__FORMAT=json` and
//! `DIRDIGEST__EXCLUDE=.git,*.tmp` (comma separated). Single-underscore
//! variables such as `DIRDIGEST_LOG` belong to the logging layer and are not
//! read here.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "DIRDIGEST";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(source())
}

fn source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("exclude")
}
