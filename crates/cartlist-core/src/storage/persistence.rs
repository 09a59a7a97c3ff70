//! Shopping list persistence
//!
//! The whole `ListCollection` is stored as JSON under one fixed key of a
//! `BlobStore`. Loading is forgiving: a missing, unreadable or malformed
//! value just means "no lists yet".
//!
//! Storage location for the file backend: `~/.local/share/cartlist/`
//! (configurable via `Config`), file `@shopping_lists.json`.

use std::sync::Arc;

use tracing::{debug, warn};

use super::blob::{BlobStore, FileBlobStore};
use super::error::StorageResult;
use crate::config::Config;
use crate::models::ListCollection;

/// Key the collection is stored under
pub const STORAGE_KEY: &str = "@shopping_lists";

/// Reads and writes full snapshots of the collection
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn BlobStore>,
    key: String,
}

impl Persistence {
    /// Persist under the default key
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Persist under a custom key
    pub fn with_key(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// File-backed persistence in the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(FileBlobStore::new(config.data_dir.clone())))
    }

    /// Load the stored collection
    ///
    /// Returns `None` when nothing is stored, and also when the stored value
    /// cannot be read or parsed (logged, never returned as an error).
    pub async fn load(&self) -> Option<ListCollection> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored lists");
                return None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored lists");
                return None;
            }
        };

        match decode(&raw) {
            Ok(lists) => {
                debug!(key = %self.key, lists = lists.len(), "Loaded stored lists");
                Some(lists)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored lists are malformed, starting empty");
                None
            }
        }
    }

    /// Write a full snapshot, replacing whatever was stored
    pub async fn save(&self, snapshot: &ListCollection) -> StorageResult<()> {
        let raw = encode(snapshot)?;
        self.store.set(&self.key, &raw).await?;
        debug!(key = %self.key, lists = snapshot.len(), "Saved lists");
        Ok(())
    }
}

/// Serialize a collection to its stored form
pub fn encode(snapshot: &ListCollection) -> StorageResult<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Parse a collection from its stored form
pub fn decode(raw: &str) -> StorageResult<ListCollection> {
    Ok(serde_json::from_str(raw)?)
}
