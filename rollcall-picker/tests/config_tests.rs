use rollcall_picker::{PickerConfig, PickerError, DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE};
use std::time::Duration;

#[test]
fn default_config() {
    let config = PickerConfig::default();
    assert_eq!(config.debounce_ms, 300);
    assert_eq!(config.debounce(), Duration::from_millis(300));
    assert_eq!(config.debounce(), DEFAULT_DEBOUNCE);
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.command_buffer, 64);
}

#[test]
fn from_json_fills_defaults() {
    let config = PickerConfig::from_json(r#"{ "debounce_ms": 150 }"#).unwrap();
    assert_eq!(config.debounce(), Duration::from_millis(150));
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(PickerConfig::from_json("{}").unwrap(), PickerConfig::default());
}

#[test]
fn from_json_rejects_wrong_types() {
    let err = PickerConfig::from_json(r#"{ "debounce_ms": "fast" }"#).unwrap_err();
    assert!(matches!(err, PickerError::Serialization(_)));
}

#[test]
fn error_display() {
    assert_eq!(PickerError::Closed.to_string(), "picker closed");
    assert_eq!(PickerError::DirectoryUnavailable.to_string(), "no directory attached");
    assert_eq!(
        PickerError::Directory("503".into()).to_string(),
        "directory error: 503"
    );
    assert!(!PickerError::Closed.is_transient());
}
