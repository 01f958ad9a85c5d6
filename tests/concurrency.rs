// Shared access through the lock-guarded wrappers.

use std::sync::Arc;
use std::thread;

use stashlist::{IndexConfig, SharedSkipList, SharedStashList};

#[test]
fn skip_list_readers_see_writer_progress() {
    let shared = Arc::new(SharedSkipList::<u64, u64>::new());
    for n in 0..1_000 {
        shared.add(n, n);
    }

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut hits = 0;
                for n in 0..1_000 {
                    if shared.get(&n) == Some(n) {
                        hits += 1;
                    }
                }
                hits
            })
        })
        .collect();
    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for n in 1_000..2_000 {
                shared.add(n, n);
            }
        })
    };

    for reader in readers {
        assert_eq!(reader.join().unwrap(), 1_000);
    }
    writer.join().unwrap();
    assert_eq!(shared.len(), 2_000);
    assert_eq!(shared.stats().add_new, 2_000);

    let list = Arc::try_unwrap(shared).unwrap().into_inner();
    assert!(list.check_invariants().is_ok());
}

#[test]
fn stash_list_mixed_traffic_keeps_invariants() {
    let shared = Arc::new(
        SharedStashList::<u32, Vec<u8>>::try_with_config(IndexConfig::default().with_max_level(10))
            .unwrap(),
    );
    let workers: Vec<_> = (0..6u64)
        .map(|t| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut rng = fastrand::Rng::with_seed(t);
                for _ in 0..2_000 {
                    let key = rng.u32(0..500);
                    match rng.u8(0..10) {
                        0 => {
                            shared.remove(&key);
                        }
                        1..=3 => {
                            shared.add(key, key.to_le_bytes().to_vec());
                        }
                        _ => {
                            if let Some(value) = shared.get(&key) {
                                assert_eq!(value, key.to_le_bytes().to_vec());
                            }
                        }
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    shared.with_list(|list| {
        assert!(list.check_invariants().is_ok());
        assert_eq!(list.iter().count(), list.len());
    });
}
