//! # Deck Error Types
//!
//! All errors that can occur while configuring a deck.
//!
//! Runtime races (a drag on a card that is no longer tracked, a reorder of
//! an item that was removed, stale shuffle offsets) are not errors. They are
//! absorbed where they happen.

use thiserror::Error;

/// Errors that can occur in the deck system.
#[derive(Error, Debug)]
pub enum DeckError {
    /// A configuration value violates its invariant.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Two items in the same deck share an identifier.
    #[error("duplicate item id: {0}")]
    DuplicateItemId(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for deck operations.
pub type DeckResult<T> = Result<T, DeckError>;
