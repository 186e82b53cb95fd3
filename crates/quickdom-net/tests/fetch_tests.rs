//! Offline tests for the fetcher's resolution and cache-first behavior.
//!
//! These tests never reach the network: they exercise the short-circuit on
//! empty resolutions and the cache-hit path, both of which must complete
//! without a transport round trip.

use quickdom_net::{Fetcher, FetcherConfig};

fn fetcher_in(dir: &std::path::Path) -> Fetcher {
    Fetcher::new(FetcherConfig {
        cache_dir: dir.to_path_buf(),
        ..FetcherConfig::default()
    })
    .unwrap()
}

#[test]
fn test_empty_reference_short_circuits() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher_in(dir.path());

    assert_eq!(fetcher.fetch_media("", "https://example.com/"), None);
    // Not even the cache directory is touched.
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_cache_hit_skips_the_network() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher_in(dir.path());

    // Seed the cache with the entry the resolved URL will map to. The
    // base URL here points at a host that does not exist, so a hit is the
    // only way this call can succeed.
    let resolved = "https://no-such-host.invalid/test.jpg";
    let seeded = fetcher.cache().store(resolved, b"fake data").unwrap();

    let path = fetcher
        .fetch_media("test.jpg", "https://no-such-host.invalid/")
        .expect("seeded entry should be served from cache");
    assert_eq!(path, seeded);
}

#[test]
fn test_media_miss_on_unreachable_host_leaves_no_entry() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher_in(dir.path());

    // `.invalid` is reserved (RFC 2606); resolution fails without a real
    // network dependency.
    let result = fetcher.fetch_media("a.jpg", "https://no-such-host.invalid/");
    assert_eq!(result, None);

    // The failure must not plant a zero-byte or partial cache file.
    let leftover = std::fs::read_dir(dir.path())
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}
