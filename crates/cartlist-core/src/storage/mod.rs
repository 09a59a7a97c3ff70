//! Storage layer
//!
//! Handles persistence of the shopping lists.
//!
//! ## Architecture
//!
//! - **BlobStore**: async key-value store of strings (file or in-memory)
//! - **Persistence**: JSON snapshot of the whole collection under one key
//! - **SaveQueue**: single background writer that keeps saves in order
//!
//! Every mutation of the `ListStore` submits a full snapshot to the queue;
//! the snapshot is read back once, at startup.

pub mod blob;
pub mod error;
pub mod persistence;
pub mod queue;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use error::{StorageError, StorageResult};
pub use persistence::{Persistence, STORAGE_KEY};
pub use queue::{spawn_save_queue, SaveCommand, SaveHandle};
