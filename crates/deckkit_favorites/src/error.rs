//! Error types for favorite storage.

use thiserror::Error;

/// Errors raised while reading or writing favorites.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// The backing file could not be read or written.
    #[error("favorite store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for storage.
    #[error("failed to encode favorites: {0}")]
    Encode(#[from] toml::ser::Error),

    /// A stored value could not be decoded.
    #[error("failed to decode favorites: {0}")]
    Decode(#[from] toml::de::Error),
}

/// Result type for favorite operations.
pub type FavoritesResult<T> = Result<T, FavoritesError>;
