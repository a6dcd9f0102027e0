use crate::archive::ComponentKind;
use std::io;
use thiserror::Error;

/// Result type for traineddata operations
pub type Result<T> = std::result::Result<T, TrainedDataError>;

/// Unified error type for all traineddata operations
#[derive(Debug, Error)]
pub enum TrainedDataError {
    // Decode errors
    #[error("Truncated data while reading {0}")]
    Truncated(&'static str),

    #[error("Invalid length for {what}: {len}")]
    InvalidLength { what: &'static str, len: i64 },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Duplicate font name in table: {0}")]
    DuplicateFont(String),

    // Archive errors
    #[error("Corrupt archive directory: {0}")]
    CorruptDirectory(String),

    #[error("Unknown component file suffix: {0}")]
    UnknownComponent(String),

    #[error("Component not present in archive: {0}")]
    ComponentNotFound(ComponentKind),

    #[error("No component files found for prefix: {0}")]
    NoComponents(String),

    // Config errors
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(String),
}

impl TrainedDataError {
    /// True for failures of the underlying file system rather than of the data
    pub fn is_io(&self) -> bool {
        matches!(self, TrainedDataError::Io(_))
    }

    /// True for malformed archive or component bytes
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            TrainedDataError::Truncated(_)
                | TrainedDataError::InvalidLength { .. }
                | TrainedDataError::InvalidFormat(_)
                | TrainedDataError::DuplicateFont(_)
                | TrainedDataError::CorruptDirectory(_)
        )
    }
}

impl From<toml::de::Error> for TrainedDataError {
    fn from(err: toml::de::Error) -> Self {
        TrainedDataError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for TrainedDataError {
    fn from(err: toml::ser::Error) -> Self {
        TrainedDataError::Toml(err.to_string())
    }
}

impl From<tempfile::PersistError> for TrainedDataError {
    fn from(err: tempfile::PersistError) -> Self {
        TrainedDataError::Io(err.error)
    }
}
