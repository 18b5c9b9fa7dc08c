//! Producers and readers hammering one store from many threads.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rolling_store::{RecordStore, RollingStore};

const CAPACITY: usize = 64;
const PRODUCERS: usize = 4;
const READERS: usize = 4;
const NAMES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

#[test]
fn concurrent_adds_and_reads_stay_consistent() {
    let store = Arc::new(RollingStore::new(CAPACITY).unwrap());
    let stop = AtomicBool::new(false);
    let adds = AtomicUsize::new(0);

    thread::scope(|s| {
        for p in 0..PRODUCERS {
            let store = &store;
            let stop = &stop;
            let adds = &adds;
            s.spawn(move || {
                let mut i = 0usize;
                while !stop.load(Ordering::Relaxed) {
                    let name = NAMES[(p + i) % NAMES.len()];
                    store.add(name, format!("{p}:{i}").into_bytes());
                    adds.fetch_add(1, Ordering::Relaxed);
                    i += 1;
                }
            });
        }

        for r in 0..READERS {
            let store = &store;
            let stop = &stop;
            s.spawn(move || {
                let mut i = 0usize;
                while !stop.load(Ordering::Relaxed) {
                    let all = store.all();
                    assert!(all.len() <= CAPACITY);

                    let name = NAMES[(r + i) % NAMES.len()];
                    if let Some(found) = store.by_name(name) {
                        assert!(!found.is_empty());
                        assert!(found.len() <= CAPACITY);
                        assert!(found.iter().all(|rec| rec.name() == name));
                    }

                    store.verify().expect("store consistent under contention");
                    i += 1;
                }
            });
        }

        thread::sleep(Duration::from_millis(200));
        stop.store(true, Ordering::Relaxed);
    });

    assert!(adds.load(Ordering::Relaxed) > 0);
    assert_eq!(store.len(), CAPACITY.min(adds.load(Ordering::Relaxed)));
    store.verify().unwrap();
}

#[test]
fn shared_as_trait_object_across_threads() {
    let store: Arc<dyn RecordStore> = Arc::new(RollingStore::new(16).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..100u32 {
                    store.add(&format!("t{t}"), i.to_be_bytes().to_vec().into());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.len(), 16);
    let total: usize = (0..4).map(|t| store.count_by_name(&format!("t{t}"))).sum();
    assert_eq!(total, 16);
}
