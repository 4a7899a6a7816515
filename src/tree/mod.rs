//! Merkle Root Computation
//!
//! Reduces an ordered sequence of records to one digest that commits to every
//! record and to their order. Records are hashed into leaves (level 0), then
//! each level is combined pairwise into the next until one digest remains.
//! A level with an odd count combines its last digest with itself.
//!
//! The whole tree is recomputed on every call; nothing is cached or persisted.

pub mod hasher;
pub mod level;

use crate::concurrency::BufferPool;
use crate::config::MerkleRootConfig;
use crate::encode::CanonicalEncode;
use crate::error::EncodingError;
use crate::types::Digest;
use hasher::{combine_with, hash_leaf_with, DynHasher, MerkleHasher, Sha256Hasher};
use tracing::{debug, trace};

pub use hasher::{Blake3Hasher, HashAlgorithm};

/// Default number of items in a level before the parallel path is taken.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Computes roots with a fixed hasher and a shared encoding buffer pool.
///
/// Holds no per-computation state, so one builder can serve concurrent calls.
#[derive(Debug)]
pub struct RootBuilder<H = Sha256Hasher> {
    hasher: H,
    pool: BufferPool,
    parallel_threshold: usize,
}

impl Default for RootBuilder<Sha256Hasher> {
    fn default() -> Self {
        Self::new(Sha256Hasher)
    }
}

impl RootBuilder<DynHasher> {
    /// Build from configuration, selecting the hash algorithm at runtime.
    pub fn from_config(config: &MerkleRootConfig) -> Self {
        RootBuilder::new(config.hashing.algorithm.hasher())
            .with_pool(BufferPool::from_config(&config.pool))
            .with_parallel_threshold(config.parallel.threshold)
    }
}

impl<H: MerkleHasher> RootBuilder<H> {
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            pool: BufferPool::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_pool(mut self, pool: BufferPool) -> Self {
        self.pool = pool;
        self
    }

    /// Minimum level width for the parallel path. Has no effect unless the
    /// `parallel` feature is enabled; a threshold of 0 is treated as 1.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.hasher.algorithm()
    }

    /// Leaf digest of one record: the hash of its canonical encoding.
    pub fn hash_leaf<T>(&self, record: &T) -> Result<Digest, EncodingError>
    where
        T: CanonicalEncode + ?Sized,
    {
        hash_leaf_with(&self.hasher, &self.pool, record)
    }

    /// Parent digest of two children, `H(left || right)`.
    pub fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        combine_with(&self.hasher, left, right)
    }

    /// Root of `records`, or `None` when there are no records.
    ///
    /// A single record's root is its leaf digest. Any encoding failure aborts
    /// the computation.
    pub fn compute_root<T>(&self, records: &[T]) -> Result<Option<Digest>, EncodingError>
    where
        T: CanonicalEncode + Sync,
    {
        match records {
            [] => {
                debug!(algorithm = %self.algorithm(), "No records, no root");
                return Ok(None);
            }
            [only] => return self.hash_leaf(only).map(Some),
            _ => {}
        }

        let mut level =
            level::leaf_level(&self.hasher, &self.pool, records, self.parallel_threshold)?;
        let mut height = 0usize;
        while level.len() > 1 {
            level = level::next_level(&self.hasher, &level, self.parallel_threshold);
            height += 1;
            trace!(height, width = level.len(), "Reduced level");
        }

        debug!(
            algorithm = %self.algorithm(),
            records = records.len(),
            height,
            "Computed merkle root"
        );
        Ok(level.pop())
    }
}

/// SHA-256 leaf digest of one record.
pub fn hash_leaf<T>(record: &T) -> Result<Digest, EncodingError>
where
    T: CanonicalEncode + ?Sized,
{
    RootBuilder::new(Sha256Hasher).hash_leaf(record)
}

/// SHA-256 of `left || right`.
pub fn combine(left: &Digest, right: &Digest) -> Digest {
    combine_with(&Sha256Hasher, left, right)
}

/// SHA-256 Merkle root of `records`, or `None` when there are no records.
pub fn compute_root<T>(records: &[T]) -> Result<Option<Digest>, EncodingError>
where
    T: CanonicalEncode + Sync,
{
    RootBuilder::new(Sha256Hasher).compute_root(records)
}
