//! # Framework Errors
//!
//! Error types shared by the slot store and the durable storage backends.
//! Cart-level code never surfaces a [`StorageError`] to its callers; these
//! errors exist so backends can report *why* a write failed and the store can
//! log it.

use std::io;

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    /// Every handle to the store was dropped; no further changes will arrive.
    #[error("Store closed")]
    StoreClosed,
}

/// Why a [`PersistentSlot`](crate::framework::PersistentSlot) refused a value.
/// Nothing is stored or written in either case.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SlotRejection<T> {
    /// The slot already holds a value, returned here.
    #[error("Slot already occupied")]
    Occupied(T),

    /// The value failed [`SlotEntity::validate`](crate::framework::SlotEntity::validate)
    /// and would not survive a reload.
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Errors reported by a [`DurableStorage`](crate::framework::DurableStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend is disabled or otherwise refusing access.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the backend's capacity.
    #[error("Storage quota exceeded writing '{key}': needs {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// The key cannot be mapped onto the backend (e.g. path separators for files).
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The value could not be serialized before writing.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// An underlying I/O error occurred.
    #[error("Storage I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(key: &str, source: io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}
