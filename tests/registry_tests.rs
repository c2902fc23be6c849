//! Registry concurrency tests
//!
//! Heavier interleavings than the in-module unit tests: mixed create,
//! resolve, stats, and list traffic from multiple threads, checking the
//! count-matches-ledger invariant afterwards.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use snaplink::registry::Registry;
use snaplink::registry::models::VisitMetadata;

fn visit(ip: &str) -> VisitMetadata {
    VisitMetadata {
        source_ip: ip.to_string(),
        user_agent: "registry-test".to_string(),
        referer: None,
    }
}

#[test]
fn test_parallel_creates_yield_unique_codes() {
    let registry = Arc::new(Registry::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                (0..100)
                    .map(|_| {
                        registry
                            .create("https://example.com", Some(30), None)
                            .unwrap()
                            .shortcode
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for code in handle.join().unwrap() {
            assert!(seen.insert(code), "duplicate shortcode issued");
        }
    }
    assert_eq!(registry.len(), 800);
}

#[test]
fn test_mixed_workload_keeps_counts_consistent() {
    let registry = Arc::new(Registry::new());
    let codes: Vec<String> = (0..4)
        .map(|i| {
            registry
                .create("https://example.com", Some(60), Some(&format!("mix{:03}", i)))
                .unwrap()
                .shortcode
        })
        .collect();

    let mut handles = Vec::new();

    // Resolvers hammer the pre-created codes.
    for (t, code) in codes.iter().cycle().take(8).enumerate() {
        let registry = registry.clone();
        let code = code.clone();
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                registry
                    .resolve(&code, visit(&format!("10.1.{}.{}", t, i)))
                    .unwrap();
            }
        }));
    }

    // Creators add fresh codes at the same time.
    for _ in 0..2 {
        let registry = registry.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                registry.create("https://example.com", Some(60), None).unwrap();
            }
        }));
    }

    // Readers take snapshots throughout; every snapshot must be internally
    // consistent even while writers are running.
    for _ in 0..2 {
        let registry = registry.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                for stats in registry.list_all() {
                    assert_eq!(stats.record.click_count as usize, stats.clicks.len());
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // 8 resolver threads spread round-robin over 4 codes: 2 threads each.
    for code in &codes {
        let stats = registry.stats(code).unwrap();
        assert_eq!(stats.record.click_count, 100);
        assert_eq!(stats.clicks.len(), 100);
    }
    assert_eq!(registry.len(), 4 + 100);
}
