//! Configuration
//!
//! Layered configuration for root computation and the CLI. Precedence, lowest
//! to highest: built-in defaults, global config file
//! (`$XDG_CONFIG_HOME/merkleroot/config.toml`), an explicit config file, then
//! `MERKLEROOT_*` environment variables with `__` separating nested keys
//! (e.g. `MERKLEROOT_HASHING__ALGORITHM=blake3`).

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::{HashAlgorithm, DEFAULT_PARALLEL_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerkleRootConfig {
    #[serde(default)]
    pub hashing: HashingConfig,

    #[serde(default)]
    pub parallel: ParallelConfig,

    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MerkleRootConfig {
    /// Reject values that would make root computation misbehave.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.parallel.threshold == 0 {
            return Err(ApiError::ConfigError(
                "parallel.threshold must be at least 1".to_string(),
            ));
        }
        if self.pool.max_pooled == 0 {
            return Err(ApiError::ConfigError(
                "pool.max_pooled must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hash function selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashingConfig {
    #[serde(default)]
    pub algorithm: HashAlgorithm,
}

/// Data-parallel hashing (only used with the `parallel` feature)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Minimum number of items in a level before rayon is used
    #[serde(default = "default_parallel_threshold")]
    pub threshold: usize,
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            threshold: default_parallel_threshold(),
        }
    }
}

/// Encoding buffer pool limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum number of idle buffers retained
    #[serde(default = "default_max_pooled")]
    pub max_pooled: usize,

    /// Buffers that grew beyond this many bytes are freed instead of retained
    #[serde(default = "default_max_buffer_capacity")]
    pub max_buffer_capacity: usize,
}

fn default_max_pooled() -> usize {
    64
}

fn default_max_buffer_capacity() -> usize {
    64 * 1024
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_pooled: default_max_pooled(),
            max_buffer_capacity: default_max_buffer_capacity(),
        }
    }
}
