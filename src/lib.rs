//! Merkleroot: Deterministic Merkle Roots
//!
//! Computes a single 256-bit digest that commits to an ordered sequence of
//! records, so the sequence can later be checked for tampering by comparing
//! roots. Records are turned into bytes through the explicit
//! [`encode::CanonicalEncode`] capability; the tree shape (odd-tail
//! self-combination) is fixed so roots are reproducible across processes.
//!
//! ```
//! let root = merkleroot::compute_root(&["apple", "banana"]).unwrap();
//! assert!(root.is_some());
//! assert_eq!(merkleroot::compute_root::<&str>(&[]).unwrap(), None);
//! ```

pub mod concurrency;
pub mod config;
pub mod encode;
pub mod error;
pub mod logging;
pub mod tooling;
pub mod tree;
pub mod types;

pub use encode::{Bincode, CanonicalEncode, Json, Nfc, SortedJson};
pub use error::{ApiError, EncodingError};
pub use tree::hasher::{Blake3Hasher, HashAlgorithm, MerkleHasher, Sha256Hasher};
pub use tree::{combine, compute_root, hash_leaf, RootBuilder};
pub use types::{Digest, DIGEST_LEN};
