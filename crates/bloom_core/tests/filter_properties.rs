use bloom_core::{expected_fpr, indices, BloomFilter, FilterError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn large_dataset_has_no_false_negatives() {
    let mut bf = BloomFilter::new(10000, 3).unwrap();
    for i in 1..=998 {
        bf.add(format!("key{i}"));
    }
    for i in 1..=998 {
        assert!(bf.check(format!("key{i}")), "key{i} missing");
    }
    // Either answer is allowed for these; the calls just have to return.
    for key in ["key999", "key1000", "unknown", "notadded"] {
        let _ = bf.check(key);
    }
    let probes = 1000;
    let hits = (0..probes)
        .filter(|i| bf.check(format!("absent{i}")))
        .count();
    let rate = hits as f64 / probes as f64;
    let bound = 3.0 * expected_fpr(10000, 3, 998);
    assert!(rate <= bound, "false positive rate {rate} above {bound}");
}

#[test]
fn false_positive_rate_stays_bounded() {
    let mut bf = BloomFilter::new(1000, 3).unwrap();
    for i in 0..100 {
        bf.add(format!("item{i}"));
    }
    let probes = 1000;
    let hits = (100..100 + probes)
        .filter(|i| bf.check(format!("item{i}")))
        .count();
    let rate = hits as f64 / probes as f64;
    assert!(rate < 0.10, "false positive rate {rate}");
    assert!(expected_fpr(1000, 3, 100) < 0.10);
}

#[test]
fn edge_case_items_round_trip() {
    let mut items: Vec<Vec<u8>> = [
        "",
        "🚀",
        "café",
        "naïve",
        "北京",
        "москва",
        "🌸🎯🏆",
        "key with spaces",
        "key\nwith\nnewlines",
        "key\twith\ttabs",
        "key\"with\"quotes",
        "key\\with\\backslashes",
    ]
    .iter()
    .map(|s| s.as_bytes().to_vec())
    .collect();
    items.push("a".repeat(10_000).into_bytes());
    items.push((0..4096u32).map(|i| (i % 251) as u8).collect());
    items.push(vec![0x00, 0x01, 0x7f, 0xff]);
    let mut bf = BloomFilter::new(1000, 3).unwrap();
    for item in &items {
        bf.add(item);
        assert!(bf.check(item), "{:?} missing", String::from_utf8_lossy(item));
    }
    for item in &items {
        assert!(bf.check(item));
    }
}

#[test]
fn random_bytes_survive_interleaved_adds() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut bf = BloomFilter::new(20_000, 4).unwrap();
    let mut added: Vec<Vec<u8>> = Vec::new();
    for _ in 0..500 {
        let len = rng.random_range(0..2048usize);
        let mut item = vec![0u8; len];
        rng.fill(&mut item[..]);
        bf.add(&item);
        added.push(item);
        let probe = &added[rng.random_range(0..added.len())];
        assert!(bf.check(probe));
    }
    assert!(added.iter().all(|item| bf.check(item)));
}

#[test]
fn separate_instances_agree() {
    let mut a = BloomFilter::new(4096, 5).unwrap();
    let mut b = BloomFilter::new(4096, 5).unwrap();
    for word in ["alpha", "beta", "gamma"] {
        a.add(word);
    }
    for word in ["gamma", "alpha", "beta", "beta"] {
        b.add(word);
    }
    assert_eq!(a, b);
    let first: Vec<u64> = indices(b"delta", 4096, 5).collect();
    assert_eq!(first, a.indices(b"delta").collect::<Vec<_>>());
}

#[test]
fn bit_primitives_fail_closed() {
    let bf = BloomFilter::new(100, 2).unwrap();
    assert_eq!(
        bf.bits().get(100),
        Err(FilterError::OutOfRange { pos: 100, size: 100 })
    );
}

#[test]
fn mutex_guarded_filter_from_threads() {
    let shared = Arc::new(Mutex::new(BloomFilter::new(50_000, 3).unwrap()));
    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for i in 0..1000 {
                shared.lock().unwrap().add(format!("concurrent-item-{i}"));
            }
        })
    };
    let reader = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for i in 0..1000 {
                let _ = shared.lock().unwrap().check(format!("concurrent-item-{i}"));
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();
    let bf = shared.lock().unwrap();
    assert!((0..1000).all(|i| bf.check(format!("concurrent-item-{i}"))));
}
