//! Concurrency Tests
//!
//! Hammers one shared cache from several threads.

use std::sync::Arc;
use std::thread;

use package_index_cache::{CacheConfig, Index, PackageCache};

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 500;

#[test]
fn test_concurrent_writers_respect_capacity() {
    let capacity = 32;
    let cache = Arc::new(PackageCache::new(CacheConfig::new(capacity, 1, true)).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    let name = format!("pkg-{}-{}", t, i);
                    let index = if i % 2 == 0 { Index::Public } else { Index::Private };
                    cache.set_package(index, &name, i % 3 == 0);
                    cache.set_page(index, &name, name.as_bytes());
                    let _ = cache.get_package(index, &name);
                    let _ = cache.stats();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let counts = cache.stats();
    assert!(counts.public_packages <= capacity);
    assert!(counts.private_packages <= capacity);
    assert!(counts.public_pages <= capacity);
    assert!(counts.private_pages <= capacity);
    assert_eq!(counts.public_packages, capacity);
}

#[test]
fn test_concurrent_readers_see_written_value() {
    let cache = Arc::new(PackageCache::new(CacheConfig::new(1024, 1, true)).unwrap());
    for i in 0..100 {
        cache.set_package(Index::Private, &format!("pkg-{}", i), i % 2 == 0);
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let info = cache
                        .get_package(Index::Private, &format!("pkg-{}", i))
                        .expect("entry present");
                    assert_eq!(info.exists(), i % 2 == 0);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.metrics().private_packages.hits, (THREADS * 100) as u64);
}

#[test]
fn test_clear_during_writes_leaves_consistent_state() {
    let capacity = 64;
    let cache = Arc::new(PackageCache::new(CacheConfig::new(capacity, 1, true)).unwrap());

    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..OPS_PER_THREAD {
                cache.set_package(Index::Public, &format!("pkg-{}", i), true);
            }
        })
    };
    let clearer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for _ in 0..50 {
                cache.clear();
            }
        })
    };

    writer.join().unwrap();
    clearer.join().unwrap();

    assert!(cache.stats().public_packages <= capacity);
    cache.clear();
    assert_eq!(cache.stats().total(), 0);
}

#[test]
fn test_disabled_cache_shared_across_threads() {
    let cache = Arc::new(PackageCache::new(CacheConfig::new(16, 1, false)).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let name = format!("pkg-{}", t);
                cache.set_package(Index::Public, &name, true);
                assert!(cache.get_package(Index::Public, &name).is_none());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.stats().total(), 0);
}
