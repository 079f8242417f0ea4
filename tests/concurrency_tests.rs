//! Concurrency Tests
//!
//! Hammers one shared cache from many plain threads. The engine serializes
//! Get and Set behind a single exclusive section, so whatever the
//! interleaving, the capacity bound and internal consistency must hold and
//! no operation may panic.

use std::thread;
use std::time::Duration;

use lru_ttl_cache::SharedCache;

const NO_EXPIRY: Option<Duration> = None;

#[test]
fn test_concurrent_sets_respect_capacity() {
    let cache: SharedCache<String, usize> = SharedCache::new(50).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    cache.set(format!("t{}-k{}", t, i), i, NO_EXPIRY).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 50);
    let stats = cache.stats();
    assert_eq!(stats.evictions, 8 * 200 - 50);
}

#[test]
fn test_concurrent_mixed_get_and_set() {
    let cache: SharedCache<String, usize> = SharedCache::new(20).unwrap();

    // Shared hot keys plus per-thread keys, with a sprinkling of short TTLs
    // so lazy expiry races against eviction.
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..300 {
                    let key = format!("hot{}", i % 5);
                    let ttl = if i % 7 == 0 {
                        Some(Duration::from_millis(1))
                    } else {
                        NO_EXPIRY
                    };
                    cache.set(key.clone(), t * 1000 + i, ttl).unwrap();
                    let _ = cache.get(&key);
                    let _ = cache.get(&format!("t{}-k{}", t, i % 10));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 20);
}

#[test]
fn test_concurrent_readers_of_one_key() {
    let cache: SharedCache<String, String> = SharedCache::new(10).unwrap();
    cache
        .set("shared".to_string(), "value".to_string(), NO_EXPIRY)
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    assert_eq!(cache.get(&"shared".to_string()).unwrap(), "value");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.hits, 8 * 500);
    assert_eq!(stats.misses, 0);
}

#[test]
fn test_concurrent_expiry_races() {
    let cache: SharedCache<String, usize> = SharedCache::new(10).unwrap();

    // Every thread repeatedly writes short-lived entries and reads them
    // back after the deadline; each expired entry must be removed exactly
    // once whichever thread observes it first.
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    let key = format!("ephemeral{}", i % 3);
                    cache
                        .set(key.clone(), t, Some(Duration::from_millis(2)))
                        .unwrap();
                    thread::sleep(Duration::from_millis(3));
                    let _ = cache.get(&key);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 10);
}
