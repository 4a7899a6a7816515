//! Pinned SHA-256 roots. A change here means every previously published root
//! is no longer reproducible.

use merkleroot::types::to_hex;
use merkleroot::{combine, compute_root, hash_leaf, Json};
use serde::Serialize;

const APPLE_LEAF: &str = "3a7bd3e2360a3d29eea436fcfb7e44c735d117c42d1c1835420b6b9942dd4f1b";
const BANANA_LEAF: &str = "b493d48364afe44d11c0165cf470a4164d1e2609911ef998be868d46ade3de4e";
const APPLE_BANANA_ROOT: &str = "aace915b5bd5667397249f50c7a921f39d8d36eb0ab9816dfb82ceb3b818a908";
const APPLE_BANANA_CHERRY_ROOT: &str =
    "30efb8c278311e6b16afa9b865d58a10b012b00bd0dfd52b9d86fbee020cc961";

#[derive(Serialize)]
struct Candidate {
    name: String,
    party: String,
    selected: bool,
}

#[test]
fn leaf_vectors() {
    assert_eq!(to_hex(&hash_leaf("apple").unwrap()), APPLE_LEAF);
    assert_eq!(to_hex(&hash_leaf("banana").unwrap()), BANANA_LEAF);
}

#[test]
fn two_record_root_is_one_combine() {
    let root = compute_root(&["apple", "banana"]).unwrap().unwrap();
    assert_eq!(to_hex(&root), APPLE_BANANA_ROOT);
    assert_eq!(
        root,
        combine(&hash_leaf("apple").unwrap(), &hash_leaf("banana").unwrap())
    );
}

#[test]
fn three_record_root_duplicates_odd_tail() {
    let root = compute_root(&["apple", "banana", "cherry"]).unwrap().unwrap();
    assert_eq!(to_hex(&root), APPLE_BANANA_CHERRY_ROOT);
}

#[test]
fn owned_and_borrowed_strings_agree() {
    let owned: Vec<String> = vec!["apple".to_string(), "banana".to_string()];
    let root = compute_root(&owned).unwrap().unwrap();
    assert_eq!(to_hex(&root), APPLE_BANANA_ROOT);
}

#[test]
fn json_record_vector() {
    let candidate = Candidate {
        name: "Jane".to_string(),
        party: "Independent".to_string(),
        selected: false,
    };
    let leaf = hash_leaf(&Json(&candidate)).unwrap();
    assert_eq!(
        to_hex(&leaf),
        "53a45de64a321878a7dd9b9dddcca728d73ad9dc5f33bda6f24e42aeac5227c0"
    );
}
