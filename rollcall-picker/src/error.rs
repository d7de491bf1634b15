//! Error types for the picker layer.

use thiserror::Error;

/// Result type for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;

/// Errors that can occur in picker operations.
///
/// None of these ever escape the picker task itself; they are returned to
/// callers of [`crate::PickerHandle`] or logged.
#[derive(Debug, Error)]
pub enum PickerError {
    /// The directory lookup failed (network or service error).
    #[error("directory error: {0}")]
    Directory(String),

    /// No directory is attached to the picker.
    #[error("no directory attached")]
    DirectoryUnavailable,

    /// The picker task has shut down.
    #[error("picker closed")]
    Closed,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Type-level error.
    #[error(transparent)]
    Types(#[from] rollcall_types::Error),
}

impl PickerError {
    /// Returns true for failures a later keystroke may recover from.
    pub fn is_transient(&self) -> bool {
        matches!(self, PickerError::Directory(_) | PickerError::DirectoryUnavailable)
    }
}
