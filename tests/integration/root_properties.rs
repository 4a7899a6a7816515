use merkleroot::concurrency::BufferPool;
use merkleroot::{combine, compute_root, hash_leaf, Blake3Hasher, Digest, RootBuilder, Sha256Hasher};
use proptest::prelude::*;

fn reference_root(records: &[Vec<u8>]) -> Option<Digest> {
    let mut level: Vec<Digest> = records.iter().map(|r| hash_leaf(r).unwrap()).collect();
    if level.len() <= 1 {
        return level.pop();
    }
    while level.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < level.len() {
            let left = level[i];
            let right = if i + 1 < level.len() { level[i + 1] } else { left };
            next.push(combine(&left, &right));
            i += 2;
        }
        level = next;
    }
    level.pop()
}

proptest! {
    #[test]
    fn root_is_deterministic(records in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..40)) {
        let first = compute_root(&records).unwrap();
        let cloned = records.clone();
        let second = compute_root(&cloned).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn root_matches_level_by_level_reference(records in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 0..33)) {
        prop_assert_eq!(compute_root(&records).unwrap(), reference_root(&records));
    }

    #[test]
    fn empty_only_when_no_records(records in prop::collection::vec(any::<u32>(), 0..8)) {
        let root = compute_root(&records).unwrap();
        prop_assert_eq!(root.is_none(), records.is_empty());
    }
}

// Without the feature the threshold is ignored and both builders run the
// same sequential path.
#[cfg(feature = "parallel")]
proptest! {
    #[test]
    fn parallel_threshold_never_changes_root(records in prop::collection::vec(any::<u64>(), 1..70)) {
        let eager = RootBuilder::new(Sha256Hasher).with_parallel_threshold(1);
        let lazy = RootBuilder::new(Sha256Hasher).with_parallel_threshold(usize::MAX);
        prop_assert_eq!(eager.compute_root(&records).unwrap(), lazy.compute_root(&records).unwrap());
    }
}

#[test]
fn single_record_root_is_its_leaf() {
    for builder_root in [
        RootBuilder::new(Sha256Hasher).compute_root(&[42u64]).unwrap(),
        compute_root(&[42u64]).unwrap(),
    ] {
        assert_eq!(builder_root, Some(hash_leaf(&42u64).unwrap()));
    }
    let blake = RootBuilder::new(Blake3Hasher);
    assert_eq!(
        blake.compute_root(&["solo"]).unwrap(),
        Some(blake.hash_leaf("solo").unwrap())
    );
}

#[test]
fn swapping_two_records_changes_root() {
    let original = compute_root(&["alice", "bob", "carol"]).unwrap();
    let swapped = compute_root(&["alice", "carol", "bob"]).unwrap();
    assert_ne!(original, swapped);
}

#[test]
fn odd_tail_matches_explicitly_duplicated_tail() {
    // [a, b, c] and [a, b, c, c] share a root under odd-tail self-combination.
    let three = compute_root(&["a", "b", "c"]).unwrap();
    let four = compute_root(&["a", "b", "c", "c"]).unwrap();
    assert_eq!(three, four);
}

#[test]
fn empty_input_is_not_a_digest() {
    let none: Vec<String> = Vec::new();
    assert!(compute_root(&none).unwrap().is_none());
}

#[test]
fn pool_buffers_return_after_computation() {
    let builder = RootBuilder::new(Sha256Hasher).with_pool(BufferPool::new(4, 1024));
    builder.compute_root(&["a", "b", "c", "d", "e"]).unwrap();
    assert!(builder.pool().available() >= 1);
    assert!(builder.pool().available() <= 4);
}
