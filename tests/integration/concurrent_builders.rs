use merkleroot::{compute_root, RootBuilder, Sha256Hasher};
use std::sync::Arc;
use std::thread;

#[test]
fn shared_builder_serves_threads_independently() {
    let builder = Arc::new(RootBuilder::new(Sha256Hasher));
    let mut handles = vec![];
    for t in 0..8usize {
        let builder = builder.clone();
        handles.push(thread::spawn(move || {
            let records: Vec<String> = (0..(t * 7 + 3)).map(|i| format!("{}-{}", t, i)).collect();
            let mut roots = Vec::new();
            for _ in 0..20 {
                roots.push(builder.compute_root(&records).unwrap());
            }
            (records, roots)
        }));
    }

    for handle in handles {
        let (records, roots) = handle.join().unwrap();
        let expected = compute_root(&records).unwrap();
        assert!(roots.iter().all(|root| *root == expected));
    }
}
