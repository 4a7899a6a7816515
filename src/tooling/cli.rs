//! CLI Tooling
//!
//! Command-line surface over root computation: read records from a file or
//! stdin, print the root, a single leaf digest, or a parent digest.

use crate::config::{ConfigLoader, MerkleRootConfig};
use crate::encode::{CanonicalEncode, Json, Nfc, SortedJson};
use crate::error::{ApiError, EncodingError};
use crate::tree::hasher::DynHasher;
use crate::tree::{HashAlgorithm, RootBuilder};
use crate::types::{from_hex, to_hex, Digest};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Merkle root CLI - deterministic integrity commitments over ordered records
#[derive(Parser, Debug)]
#[command(name = "merkleroot")]
#[command(about = "Compute deterministic Merkle roots over ordered records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Hash algorithm (sha256, blake3)
    #[arg(long, global = true)]
    pub algorithm: Option<String>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub output: String,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file"); outranks MERKLEROOT_LOG_FILE
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the root of a sequence of records
    Root {
        /// Input file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Input layout: lines (one record per line) or json (a JSON array)
        #[arg(long, default_value = "lines")]
        format: String,
        /// Record encoding: utf8, nfc, json, sorted-json
        #[arg(long, default_value = "utf8")]
        encoding: String,
    },
    /// Compute the leaf digest of one record
    Leaf {
        /// The record
        record: String,
        /// Record encoding: utf8, nfc, json, sorted-json
        #[arg(long, default_value = "utf8")]
        encoding: String,
    },
    /// Combine two hex digests into their parent digest
    Combine {
        /// Left child digest (hex)
        left: String,
        /// Right child digest (hex)
        right: String,
    },
}

/// How a record read by the CLI is turned into canonical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordEncoding {
    Utf8,
    Nfc,
    Json,
    SortedJson,
}

impl RecordEncoding {
    fn is_json(self) -> bool {
        matches!(self, RecordEncoding::Json | RecordEncoding::SortedJson)
    }
}

impl FromStr for RecordEncoding {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "utf8" | "utf-8" => Ok(RecordEncoding::Utf8),
            "nfc" => Ok(RecordEncoding::Nfc),
            "json" => Ok(RecordEncoding::Json),
            "sorted-json" => Ok(RecordEncoding::SortedJson),
            other => Err(ApiError::InvalidInput(format!(
                "Unknown encoding: {} (must be 'utf8', 'nfc', 'json', or 'sorted-json')",
                other
            ))),
        }
    }
}

/// Input layout for the `root` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Lines,
    JsonArray,
}

impl FromStr for InputFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(InputFormat::Lines),
            "json" => Ok(InputFormat::JsonArray),
            other => Err(ApiError::InvalidInput(format!(
                "Unknown input format: {} (must be 'lines' or 'json')",
                other
            ))),
        }
    }
}

/// A parsed record paired with the encoding chosen on the command line.
struct CliRecord<'a> {
    value: &'a Value,
    encoding: RecordEncoding,
}

impl CanonicalEncode for CliRecord<'_> {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        match self.encoding {
            RecordEncoding::Utf8 | RecordEncoding::Nfc => {
                let text = self.value.as_str().ok_or_else(|| {
                    EncodingError::Unsupported(format!(
                        "text encodings need string records, got {}",
                        self.value
                    ))
                })?;
                if self.encoding == RecordEncoding::Nfc {
                    Nfc(text).encode_canonical(out)
                } else {
                    text.encode_canonical(out)
                }
            }
            RecordEncoding::Json => Json(self.value).encode_canonical(out),
            RecordEncoding::SortedJson => SortedJson(self.value).encode_canonical(out),
        }
    }
}

/// Parse raw input into records.
///
/// `lines` yields one record per line; with a JSON encoding each line is
/// parsed as a JSON value (JSON Lines). `json` expects a single JSON array.
pub fn parse_records(
    input: &str,
    format: InputFormat,
    encoding: RecordEncoding,
) -> Result<Vec<Value>, ApiError> {
    match format {
        InputFormat::Lines => input
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                if encoding.is_json() {
                    serde_json::from_str(line).map_err(|e| {
                        ApiError::InvalidInput(format!("line {}: {}", idx + 1, e))
                    })
                } else {
                    Ok(Value::String(line.to_string()))
                }
            })
            .collect(),
        InputFormat::JsonArray => match serde_json::from_str(input) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => Err(ApiError::InvalidInput(
                "JSON input must be an array of records".to_string(),
            )),
            Err(e) => Err(ApiError::InvalidInput(format!("Invalid JSON input: {}", e))),
        },
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// CLI context: resolved configuration and a root builder built from it.
pub struct CliContext {
    config: MerkleRootConfig,
    builder: RootBuilder<DynHasher>,
    output: OutputFormat,
}

impl CliContext {
    /// Load configuration and apply command-line overrides.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        apply_overrides(&mut config, cli)?;
        Self::from_config(config, &cli.output)
    }

    /// Build a context from an already-resolved configuration.
    pub fn from_config(config: MerkleRootConfig, output: &str) -> Result<Self, ApiError> {
        config.validate()?;
        let output = match output {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            other => {
                return Err(ApiError::InvalidInput(format!(
                    "Invalid output format: {} (must be 'text' or 'json')",
                    other
                )))
            }
        };
        let builder = RootBuilder::from_config(&config);
        Ok(Self {
            config,
            builder,
            output,
        })
    }

    pub fn config(&self) -> &MerkleRootConfig {
        &self.config
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.builder.algorithm()
    }

    /// Execute a command, reading `root` input from its file or stdin.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Root {
                input,
                format,
                encoding,
            } => {
                let raw = match input {
                    Some(path) => std::fs::read_to_string(path)?,
                    None => {
                        let mut buf = String::new();
                        std::io::stdin().read_to_string(&mut buf)?;
                        buf
                    }
                };
                self.root_of(&raw, format.parse()?, encoding.parse()?)
            }
            Commands::Leaf { record, encoding } => self.leaf_of(record, encoding.parse()?),
            Commands::Combine { left, right } => self.combine_hex(left, right),
        }
    }

    /// Root of records parsed from `raw`, formatted for output.
    pub fn root_of(
        &self,
        raw: &str,
        format: InputFormat,
        encoding: RecordEncoding,
    ) -> Result<String, ApiError> {
        let values = parse_records(raw, format, encoding)?;
        let records: Vec<CliRecord<'_>> = values
            .iter()
            .map(|value| CliRecord { value, encoding })
            .collect();
        let root = self.builder.compute_root(&records)?;
        info!(
            algorithm = %self.algorithm(),
            count = records.len(),
            empty = root.is_none(),
            "Root computed"
        );

        Ok(match self.output {
            OutputFormat::Text => root.as_ref().map(to_hex).unwrap_or_else(|| "empty".to_string()),
            OutputFormat::Json => json!({
                "algorithm": self.algorithm().as_str(),
                "count": records.len(),
                "root": root.as_ref().map(to_hex),
            })
            .to_string(),
        })
    }

    /// Leaf digest of a single record given on the command line.
    pub fn leaf_of(&self, record: &str, encoding: RecordEncoding) -> Result<String, ApiError> {
        let value = if encoding.is_json() {
            serde_json::from_str(record)
                .map_err(|e| ApiError::InvalidInput(format!("Invalid JSON record: {}", e)))?
        } else {
            Value::String(record.to_string())
        };
        let leaf = self.builder.hash_leaf(&CliRecord {
            value: &value,
            encoding,
        })?;
        Ok(self.format_digest("leaf", &leaf))
    }

    /// Parent digest of two hex-encoded children.
    pub fn combine_hex(&self, left: &str, right: &str) -> Result<String, ApiError> {
        let left = from_hex(left)?;
        let right = from_hex(right)?;
        let parent = self.builder.combine(&left, &right);
        Ok(self.format_digest("parent", &parent))
    }

    fn format_digest(&self, field: &str, digest: &Digest) -> String {
        match self.output {
            OutputFormat::Text => to_hex(digest),
            OutputFormat::Json => json!({
                "algorithm": self.algorithm().as_str(),
                field: to_hex(digest),
            })
            .to_string(),
        }
    }
}

fn apply_overrides(config: &mut MerkleRootConfig, cli: &Cli) -> Result<(), ApiError> {
    if let Some(algorithm) = &cli.algorithm {
        config.hashing.algorithm = algorithm.parse()?;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        config.logging.output = output.clone();
    }
    Ok(())
}
