//! MergeService: orchestrates sources, deserializes to MerkleRootConfig.

use crate::config::sources::{environment, global_file};
use crate::config::MerkleRootConfig;
use config::{Config, ConfigError, File, FileFormat};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: global file (lowest) -> environment (highest).
    pub fn load() -> Result<MerkleRootConfig, ConfigError> {
        let builder = Config::builder();
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    ///
    /// The file must exist. Format is inferred from the extension, falling
    /// back to TOML.
    pub fn load_from_file(path: &Path) -> Result<MerkleRootConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let source = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => File::from(path).format(FileFormat::Json),
            Some("yaml") | Some("yml") => File::from(path).format(FileFormat::Yaml),
            _ => File::from(path).format(FileFormat::Toml),
        };

        let builder = Config::builder().add_source(source);
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
