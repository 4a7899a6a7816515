//! Hash functions and the two hashing primitives of the tree: leaf hashing and
//! pair combination.

use crate::concurrency::BufferPool;
use crate::encode::CanonicalEncode;
use crate::error::{ApiError, EncodingError};
use crate::types::{Digest, DIGEST_LEN};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

/// A 256-bit hash function.
///
/// Implementations hold no per-call state: every `hash` call starts a fresh
/// hash state, so one instance can be shared freely across threads.
pub trait MerkleHasher: Send + Sync {
    fn hash(&self, bytes: &[u8]) -> Digest;

    fn algorithm(&self) -> HashAlgorithm;
}

impl<H: MerkleHasher + ?Sized> MerkleHasher for Box<H> {
    fn hash(&self, bytes: &[u8]) -> Digest {
        (**self).hash(bytes)
    }

    fn algorithm(&self) -> HashAlgorithm {
        (**self).algorithm()
    }
}

/// Hasher chosen at runtime, e.g. from configuration.
pub type DynHasher = Box<dyn MerkleHasher>;

/// SHA-256
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    fn hash(&self, bytes: &[u8]) -> Digest {
        Sha256::digest(bytes).into()
    }

    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }
}

/// BLAKE3 in its default 256-bit output mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    fn hash(&self, bytes: &[u8]) -> Digest {
        *blake3::hash(bytes).as_bytes()
    }

    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Blake3
    }
}

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn hasher(self) -> DynHasher {
        match self {
            HashAlgorithm::Sha256 => Box::new(Sha256Hasher),
            HashAlgorithm::Blake3 => Box::new(Blake3Hasher),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(ApiError::ConfigError(format!(
                "Unknown hash algorithm: {} (must be 'sha256' or 'blake3')",
                other
            ))),
        }
    }
}

/// Hash one record's canonical bytes into a leaf digest.
///
/// The encoding buffer is borrowed from `pool` for the duration of the call
/// and returned even when encoding fails.
pub fn hash_leaf_with<H, T>(
    hasher: &H,
    pool: &BufferPool,
    record: &T,
) -> Result<Digest, EncodingError>
where
    H: MerkleHasher + ?Sized,
    T: CanonicalEncode + ?Sized,
{
    let mut buf = pool.acquire();
    record.encode_canonical(&mut buf)?;
    Ok(hasher.hash(&buf))
}

/// Hash `left || right` into a parent digest.
///
/// No separator or length prefix; swapping the arguments changes the result.
pub fn combine_with<H>(hasher: &H, left: &Digest, right: &Digest) -> Digest
where
    H: MerkleHasher + ?Sized,
{
    let mut scratch = [0u8; 2 * DIGEST_LEN];
    scratch[..DIGEST_LEN].copy_from_slice(left);
    scratch[DIGEST_LEN..].copy_from_slice(right);
    hasher.hash(&scratch)
}
