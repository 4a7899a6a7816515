//! Level construction: the leaf level from records, and each parent level
//! from the one below it.

use super::hasher::{combine_with, hash_leaf_with, MerkleHasher};
use crate::concurrency::BufferPool;
use crate::encode::CanonicalEncode;
use crate::error::EncodingError;
use crate::types::Digest;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Hash every record into level 0, preserving input order.
///
/// Fails on the first record that cannot be encoded. With the `parallel`
/// feature and at least `parallel_threshold` records, leaves are hashed on the
/// rayon pool; which failing record is reported is then unspecified.
pub fn leaf_level<H, T>(
    hasher: &H,
    pool: &BufferPool,
    records: &[T],
    parallel_threshold: usize,
) -> Result<Vec<Digest>, EncodingError>
where
    H: MerkleHasher + ?Sized,
    T: CanonicalEncode + Sync,
{
    #[cfg(feature = "parallel")]
    if records.len() >= parallel_threshold {
        return records
            .par_iter()
            .map(|record| hash_leaf_with(hasher, pool, record))
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel_threshold;

    records
        .iter()
        .map(|record| hash_leaf_with(hasher, pool, record))
        .collect()
}

/// Combine a level pairwise, left to right, into its parent level.
///
/// An unpaired last digest is combined with itself.
pub fn next_level<H>(hasher: &H, level: &[Digest], parallel_threshold: usize) -> Vec<Digest>
where
    H: MerkleHasher + ?Sized,
{
    #[cfg(feature = "parallel")]
    if level.len() >= parallel_threshold {
        return level
            .par_chunks(2)
            .map(|pair| combine_pair(hasher, pair))
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel_threshold;

    level
        .chunks(2)
        .map(|pair| combine_pair(hasher, pair))
        .collect()
}

fn combine_pair<H>(hasher: &H, pair: &[Digest]) -> Digest
where
    H: MerkleHasher + ?Sized,
{
    let left = &pair[0];
    let right = pair.get(1).unwrap_or(left);
    combine_with(hasher, left, right)
}
