//! Generated id tests

use kvc_domain::value_objects::GeneratedId;

#[test]
fn test_generated_id_segments() {
    let id = GeneratedId::compose(75_000_000, 42);

    assert_eq!(id.timestamp_segment(), 75_000_000);
    assert_eq!(id.counter_segment(), 42);
    assert_eq!(id.value(), (75_000_000_i64 << 32) | 42);
    assert_eq!(i64::from(id), id.value());
    assert_eq!(GeneratedId::from_raw(id.value()), id);
}

#[test]
fn test_timestamp_segment_dominates_ordering() {
    let late_in_second = GeneratedId::compose(100, u32::MAX as i64);
    let next_second = GeneratedId::compose(101, 1);

    assert!(next_second > late_in_second);
    assert!(GeneratedId::compose(100, 2) > GeneratedId::compose(100, 1));
}

#[test]
fn test_generated_id_serializes_as_number() {
    let id = GeneratedId::compose(1, 1);
    assert_eq!(serde_json::to_string(&id).unwrap(), "4294967297");
    assert_eq!(id.to_string(), "4294967297");
}
