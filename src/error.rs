use thiserror::Error;

/// Errors surfaced by the persistence backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O failure while reading or writing a stored key.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors produced by the swatch engine.
///
/// `EmptyName` and `NotFound` never leave the store as `Err`; they are
/// absorbed and logged so callers only observe that nothing happened.
#[derive(Debug, Error)]
pub enum SwatchError {
    #[error("color name cannot be empty")]
    EmptyName,

    #[error("no color with id {0}")]
    NotFound(String),

    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The history position does not refer to any record.
    #[error("history position {position} is out of range (len {len})")]
    StalePosition { position: usize, len: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T, E = SwatchError> = std::result::Result<T, E>;

/// Errors reading `config.toml`. A missing file is not an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },
}
