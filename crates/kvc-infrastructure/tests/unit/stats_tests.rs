//! Cache stats tests

use kvc_infrastructure::cache::CacheStats;

#[test]
fn test_hit_rate_empty() {
    assert!(CacheStats::default().hit_rate().abs() < f64::EPSILON);
}

#[test]
fn test_hit_rate_counts_every_served_read() {
    let stats = CacheStats {
        hits: 2,
        null_hits: 1,
        stale_hits: 1,
        misses: 4,
        ..CacheStats::default()
    };

    assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_serializes() {
    let json = serde_json::to_value(CacheStats {
        hits: 3,
        ..CacheStats::default()
    })
    .unwrap();

    assert_eq!(json["hits"], 3);
    assert_eq!(json["rebuilds_scheduled"], 0);
}
