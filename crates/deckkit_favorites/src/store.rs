//! # Key-Value Stores
//!
//! Favorites and settings are stored as TOML values under string keys.
//!
//! ```text
//! ┌───────────────────────┐     ┌─────────────┐
//! │ StoreFavoriteService  │────>│ MemoryStore │  tests, previews
//! │ FavoriteContext       │     ├─────────────┤
//! └───────────────────────┘────>│TomlFileStore│  apps (one file)
//!                               └─────────────┘
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use toml::{Table, Value};

use crate::error::FavoritesResult;

/// A string-keyed store of TOML values.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if a persistent store cannot write the change.
    fn set(&self, key: &str, value: Value) -> FavoritesResult<()>;

    /// Removes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if a persistent store cannot write the change.
    fn remove(&self, key: &str) -> FavoritesResult<()>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> FavoritesResult<()> {
        self.values.write().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> FavoritesResult<()> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// Store backed by a single TOML file.
///
/// The whole table is kept in memory and the file is rewritten on every
/// change. Writes go to a sibling `.tmp` file that replaces the store file
/// only once it is synced, so a crash mid-write keeps the previous contents.
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    table: RwLock<Table>,
}

impl TomlFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FavoritesError::Io`] if an existing file cannot be
    /// read and [`crate::FavoritesError::Decode`] if it is not valid TOML.
    pub fn open(path: impl AsRef<Path>) -> FavoritesResult<Self> {
        let path = path.as_ref().to_path_buf();

        let table = match std::fs::read_to_string(&path) {
            Ok(source) => source.parse::<Table>()?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(error) => return Err(error.into()),
        };

        tracing::debug!("Opened favorite store {} ({} keys)", path.display(), table.len());
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn persist(&self, table: &Table) -> FavoritesResult<()> {
        let source = toml::to_string(table)?;
        let temp_path = self.temp_path();
        {
            let mut file = BufWriter::new(File::create(&temp_path)?);
            file.write_all(source.as_bytes())?;
            file.flush()?;
            file.get_ref().sync_all()?;
        }
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.table.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> FavoritesResult<()> {
        let mut table = self.table.write();
        table.insert(key.to_owned(), value);
        self.persist(&table)
    }

    fn remove(&self, key: &str) -> FavoritesResult<()> {
        let mut table = self.table.write();
        if table.remove(key).is_some() {
            self.persist(&table)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> FavoritesResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> FavoritesResult<()> {
        (**self).remove(key)
    }
}
