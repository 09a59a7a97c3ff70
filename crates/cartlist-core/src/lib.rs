//! cartlist Core Library
//!
//! This crate provides the core functionality for cartlist, a local-first
//! shopping list manager: named lists of items that can be checked off,
//! edited, renamed, shared, and are saved on every change.
//!
//! # Architecture
//!
//! - **ListStore**: in-memory state and the only write path into it
//! - **Persistence**: snapshot storage, written by a background save queue
//!
//! # Quick Start
//!
//! ```text
//! let (mut store, saves) = ListStore::open(&config).await;
//!
//! // Creates "List 1" and selects it
//! store.add_or_update_item("Milk")?;
//! store.toggle_bought(0)?;
//!
//! // Make sure the last change is on disk before exiting
//! saves.flush().await;
//! ```
//!
//! # Modules
//!
//! - `store`: list and item operations (main entry point)
//! - `models`: items and the list collection
//! - `session`: transient input state (edit cursor, prompts)
//! - `storage`: blob stores, persistence and the save queue
//! - `share`: share message and deep link formatting
//! - `config`: application configuration

pub mod config;
pub mod models;
pub mod session;
pub mod share;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{Item, ListCollection};
pub use session::{EditCursor, EditSession};
pub use share::{format_share_message, ShareTarget};
pub use storage::{Persistence, SaveHandle, StorageError};
pub use store::{AddOutcome, ListStore, SnapshotSink, StoreError};
