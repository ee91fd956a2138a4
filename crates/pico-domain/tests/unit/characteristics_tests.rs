//! Characteristics Tests

use pico_domain::error::Error;
use pico_domain::value_objects::Characteristics;
use pico_domain::value_objects::characteristics::{
    CACHE, CDI, HIDE_IMPL, LOCK, NO_CACHE, SDI, SINGLE, names,
};

#[test]
fn test_reader_reports_unconsumed_switches() {
    let set: Characteristics = [CACHE, LOCK, HIDE_IMPL].into_iter().collect();
    let mut reader = set.reader();

    assert_eq!(reader.flag(names::CACHE).unwrap(), Some(true));
    assert!(reader.flag_or(names::LOCKING, false).unwrap());

    assert_eq!(reader.unprocessed(), vec![names::HIDE_IMPL.to_string()]);
}

#[test]
fn test_reader_absent_switch_uses_default() {
    let set = Characteristics::new();
    let mut reader = set.reader();

    assert!(!reader.flag_or(names::CACHE, false).unwrap());
    assert!(reader.value(names::INJECTION).is_none());
    assert!(reader.unprocessed().is_empty());
}

#[test]
fn test_non_boolean_flag_is_invalid() {
    let set = Characteristics::from_pairs([(names::CACHE, "sometimes")]);

    let err = set.flag(names::CACHE).unwrap_err();

    assert!(matches!(err, Error::InvalidCharacteristic { ref name, .. } if name == names::CACHE));
    assert!(!set.is_enabled(names::CACHE));
}

#[test]
fn test_single_is_a_synonym_for_cache() {
    assert_eq!(SINGLE, CACHE);
    let set: Characteristics = [NO_CACHE].into_iter().collect();
    assert_eq!(set.flag(names::CACHE).unwrap(), Some(false));
}

#[test]
fn test_later_injection_switch_wins() {
    let set: Characteristics = [CDI, SDI].into_iter().collect();
    assert_eq!(set.get(names::INJECTION), Some("setter"));
}

#[test]
fn test_display_lists_entries_in_name_order() {
    let set: Characteristics = [LOCK, CACHE].into_iter().collect();
    assert_eq!(set.to_string(), "{cache=true, locking=true}");
}

#[test]
fn test_serde_round_trip_is_a_plain_map() {
    let set: Characteristics = [CACHE].into_iter().collect();

    let json = serde_json::to_value(&set).unwrap();

    assert_eq!(json, serde_json::json!({ "cache": "true" }));
}
