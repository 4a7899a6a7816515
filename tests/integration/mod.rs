//! Integration tests for Merkle root computation

mod concurrent_builders;
mod golden_vectors;
mod root_properties;
mod rs_merkle_interop;
