//! Error types for the Bean core library.
//!
//! Narrative events (a Bean running away, getting sick, ...) are *not*
//! errors; they travel through [`crate::event::EventSink`]. Everything here
//! is a real failure that leaves the Bean untouched for the turn.

use thiserror::Error;

/// Boxed cause attached to a data source failure.
pub type SourceCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Bean operations.
#[derive(Error, Debug)]
pub enum BeanError {
    /// An action data source could not be read or parsed.
    #[error("Failed to load action source '{source_id}': {cause}")]
    SourceLoad {
        /// Identifier of the source (e.g. `kind.csv`).
        source_id: String,
        /// Underlying reason.
        #[source]
        cause: SourceCause,
    },

    /// No row in the loaded source matches the requested action key.
    #[error("Action '{action}' not found in source '{source_id}'")]
    ActionNotFound {
        /// Identifier of the searched source.
        source_id: String,
        /// The action key that was requested.
        action: String,
    },

    /// A personality name did not match any known variant.
    #[error("Unknown personality: {0}")]
    UnknownPersonality(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored save slot failed checksum verification.
    #[error("Checksum mismatch for save slot '{slot}' (expected {expected}, found {actual})")]
    ChecksumMismatch {
        /// Slot that failed verification.
        slot: String,
        /// Checksum recorded at save time.
        expected: String,
        /// Checksum of the data actually read.
        actual: String,
    },

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BeanError {
    /// Build a [`BeanError::SourceLoad`] from any error-like cause.
    pub fn source_load(source_id: impl Into<String>, cause: impl Into<SourceCause>) -> Self {
        Self::SourceLoad {
            source_id: source_id.into(),
            cause: cause.into(),
        }
    }

    /// Whether this error came from the action data layer (as opposed to
    /// configuration or persistence).
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::SourceLoad { .. } | Self::ActionNotFound { .. })
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, BeanError>;
