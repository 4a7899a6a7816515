//! Cross-checks against rs_merkle's SHA-256 tree. Both combine `left || right`
//! with no domain separation; they differ only in how an odd node is carried
//! up (rs_merkle promotes it unchanged, this crate combines it with itself).

use merkleroot::{combine, compute_root, hash_leaf, Digest};
use rs_merkle::algorithms::Sha256;
use rs_merkle::MerkleTree;

fn leaves(records: &[&str]) -> Vec<Digest> {
    records.iter().map(|r| hash_leaf(*r).unwrap()).collect()
}

fn rs_merkle_root(records: &[&str]) -> Option<Digest> {
    MerkleTree::<Sha256>::from_leaves(&leaves(records)).root()
}

#[test]
fn power_of_two_inputs_agree() {
    for records in [
        vec!["a", "b"],
        vec!["a", "b", "c", "d"],
        vec!["1", "2", "3", "4", "5", "6", "7", "8"],
    ] {
        assert_eq!(compute_root(&records).unwrap(), rs_merkle_root(&records));
    }
}

#[test]
fn odd_inputs_differ_from_promotion() {
    let records = ["a", "b", "c"];
    let ours = compute_root(&records).unwrap();
    let theirs = rs_merkle_root(&records);
    assert_ne!(ours, theirs);

    let l = leaves(&records);
    assert_eq!(theirs, Some(combine(&combine(&l[0], &l[1]), &l[2])));
    assert_eq!(
        ours,
        Some(combine(&combine(&l[0], &l[1]), &combine(&l[2], &l[2])))
    );
}
