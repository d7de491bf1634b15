//! Picker configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Quiet period after the last keystroke before a search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Number of people requested from a directory (first page only).
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Capacity of the command channel between handles and the picker task.
pub const DEFAULT_COMMAND_BUFFER: usize = 64;

/// Configuration for a picker instance. Fixed for the picker's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Debounce window in milliseconds.
    pub debounce_ms: u64,
    /// Maximum suggestions shown per search. Longer directory replies are
    /// cut to their first `page_size` entries.
    pub page_size: usize,
    /// Command channel capacity.
    pub command_buffer: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            page_size: DEFAULT_PAGE_SIZE,
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

impl PickerConfig {
    /// Returns the debounce window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parses a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::PickerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
