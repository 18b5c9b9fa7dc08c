//! Quantified properties over arbitrary add sequences.

use std::collections::HashMap;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rolling_store::{Record, RollingStore};

/// Multiset of `(name, payload)` pairs.
fn multiset<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> HashMap<(String, Vec<u8>), usize> {
    let mut counts = HashMap::new();
    for r in records {
        *counts
            .entry((r.name().to_owned(), r.payload().to_vec()))
            .or_insert(0) += 1;
    }
    counts
}

/// All() equals the disjoint union of ByName over every live name.
fn assert_partitioned(store: &RollingStore) {
    let all = store.all();
    let mut union = Vec::new();
    for name in store.names() {
        let found = store.by_name(&name).expect("listed name must be found");
        assert!(!found.is_empty());
        union.extend(found);
    }
    assert_eq!(union.len(), all.len());
    assert_eq!(multiset(&union), multiset(&all));
}

fn ops() -> impl Strategy<Value = (usize, Vec<(u8, u32)>)> {
    (1usize..16).prop_flat_map(|cap| {
        (
            Just(cap),
            proptest::collection::vec((0u8..6, any::<u32>()), 0..64),
        )
    })
}

fn name_of(n: u8) -> String {
    format!("n{n}")
}

/// Payloads carry the add's sequence number so eviction order is checkable.
fn tagged(seq: usize, extra: u32) -> Vec<u8> {
    let mut v = (seq as u64).to_be_bytes().to_vec();
    v.extend_from_slice(&extra.to_be_bytes());
    v
}

fn seq_of(record: &Record) -> usize {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&record.payload()[..8]);
    u64::from_be_bytes(buf) as usize
}

proptest! {
    #[test]
    fn len_never_exceeds_capacity((cap, adds) in ops()) {
        let store = RollingStore::new(cap).unwrap();
        for (i, (n, extra)) in adds.iter().enumerate() {
            store.add(name_of(*n), tagged(i, *extra));
            prop_assert!(store.all().len() <= cap);
        }
        prop_assert_eq!(store.len(), adds.len().min(cap));
    }

    #[test]
    fn by_name_only_returns_matching_names((cap, adds) in ops()) {
        let store = RollingStore::new(cap).unwrap();
        for (i, (n, extra)) in adds.iter().enumerate() {
            store.add(name_of(*n), tagged(i, *extra));
        }
        for n in 0u8..6 {
            let name = name_of(n);
            if let Some(found) = store.by_name(&name) {
                prop_assert!(!found.is_empty());
                prop_assert!(found.iter().all(|r| r.name() == name));
            }
        }
    }

    #[test]
    fn all_is_union_of_by_name((cap, adds) in ops()) {
        let store = RollingStore::new(cap).unwrap();
        for (i, (n, extra)) in adds.iter().enumerate() {
            store.add(name_of(*n), tagged(i, *extra));
            assert_partitioned(&store);
        }
        store.verify().unwrap();
    }

    #[test]
    fn growing_preserves_insertion_order((cap, adds) in ops()) {
        let store = RollingStore::new(cap).unwrap();
        let k = adds.len().min(cap);
        for (i, (n, extra)) in adds.iter().take(k).enumerate() {
            store.add(name_of(*n), tagged(i, *extra));
        }
        let all = store.all();
        prop_assert_eq!(all.len(), k);
        for (i, r) in all.iter().enumerate() {
            prop_assert_eq!(seq_of(r), i);
        }
    }

    #[test]
    fn rolling_keeps_newest_capacity_adds((cap, adds) in ops()) {
        prop_assume!(adds.len() > cap);
        let store = RollingStore::new(cap).unwrap();
        for (i, (n, extra)) in adds.iter().enumerate() {
            store.add(name_of(*n), tagged(i, *extra));
        }
        let m = adds.len() - cap;
        let mut seqs: Vec<usize> = store.all().iter().map(seq_of).collect();
        prop_assert_eq!(seqs.len(), cap);
        seqs.sort_unstable();
        prop_assert_eq!(seqs, (m..m + cap).collect::<Vec<_>>());
    }

    #[test]
    fn every_live_record_found_by_name((cap, adds) in ops()) {
        let store = RollingStore::new(cap).unwrap();
        for (i, (n, extra)) in adds.iter().enumerate() {
            store.add(name_of(*n), tagged(i, *extra));
        }
        for r in store.all() {
            let found = store.by_name(r.name()).unwrap();
            prop_assert!(found.contains(&r));
        }
    }
}

#[test]
fn random_workload_stays_partitioned() {
    const ADDS: usize = 10_000;
    const NAMES: usize = 50;

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let names: Vec<String> = (0..NAMES).map(|i| format!("name-{i}")).collect();
    let store = RollingStore::new(100).unwrap();

    for _ in 0..ADDS {
        let name = &names[rng.gen_range(0..NAMES)];
        let len = rng.gen_range(0..16);
        let payload: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        store.add(name.as_str(), payload);

        let all = store.all();
        let mut union = Vec::new();
        for name in &names {
            if let Some(found) = store.by_name(name) {
                union.extend(found);
            }
        }
        assert_eq!(multiset(&union), multiset(&all));
    }

    assert_eq!(store.len(), 100);
    store.verify().unwrap();
}
