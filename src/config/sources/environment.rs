//! Environment variable source: MERKLEROOT_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "MERKLEROOT";

/// Add environment variable overlay to builder.
/// Uses MERKLEROOT_ prefix and __ as separator for nested keys, so
/// `MERKLEROOT_PARALLEL__THRESHOLD` sets `parallel.threshold`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
