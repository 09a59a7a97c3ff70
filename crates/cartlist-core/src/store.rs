//! Shopping list store
//!
//! `ListStore` owns every list, the active list name, and the transient
//! edit session. It is the only write path into the collection: each
//! successful mutation hands a full snapshot to a `SnapshotSink`, which
//! normally forwards it to the background save queue.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = ListStore::in_memory();
//!
//! // No active list yet, so this creates "List 1"
//! store.add_or_update_item("Milk")?;
//!
//! // Overwrite instead of append
//! store.edit_item(0)?;
//! store.add_or_update_item("Oat Milk")?;
//! ```

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::{Item, ListCollection};
use crate::session::{EditCursor, EditSession};
use crate::share::format_share_message;
use crate::storage::{spawn_save_queue, Persistence, SaveHandle};

/// Prefix for generated list names
pub const LIST_NAME_PREFIX: &str = "List";

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No list is selected")]
    NoActiveList,

    #[error("Item {index} does not exist (list has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("A list named '{0}' already exists")]
    DuplicateName(String),

    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("List name cannot be empty")]
    InvalidName,
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Receives a full snapshot after every mutation
///
/// Implementations must not block; persistence happens elsewhere.
pub trait SnapshotSink: Send {
    fn submit(&self, snapshot: ListCollection);
}

/// Sink that discards snapshots
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPersistence;

impl SnapshotSink for NoPersistence {
    fn submit(&self, _snapshot: ListCollection) {}
}

/// What `add_or_update_item` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Blank input, nothing changed
    Rejected,
    /// No list was active, so one was created holding the item
    CreatedList { list: String, index: usize },
    /// Item added at the end of the active list
    Appended { index: usize },
    /// Item written over the one under the edit cursor
    Replaced { index: usize },
}

/// In-memory state for all shopping lists
pub struct ListStore {
    /// Every list, keyed by unique name
    lists: ListCollection,
    /// Name of the list on screen, always a key of `lists` when set
    active: Option<String>,
    /// Transient input state
    session: EditSession,
    /// Where snapshots go after each mutation
    sink: Box<dyn SnapshotSink>,
}

impl ListStore {
    /// Create a store over an existing collection, with no list selected
    pub fn new(lists: ListCollection, sink: Box<dyn SnapshotSink>) -> Self {
        Self {
            lists,
            active: None,
            session: EditSession::default(),
            sink,
        }
    }

    /// Empty store that persists nothing
    pub fn in_memory() -> Self {
        Self::new(ListCollection::new(), Box::new(NoPersistence))
    }

    /// Open the store from the configured data directory
    ///
    /// Must run inside a tokio runtime; the save queue is spawned on it.
    pub async fn open(config: &Config) -> (Self, SaveHandle) {
        Self::open_with(Persistence::from_config(config)).await
    }

    /// Load stored lists once and start the save queue
    ///
    /// Stored data that is missing or unreadable gives an empty store.
    pub async fn open_with(persistence: Persistence) -> (Self, SaveHandle) {
        let lists = persistence.load().await.unwrap_or_default();
        let saves = spawn_save_queue(persistence);
        let store = Self::new(lists, Box::new(saves.clone()));
        (store, saves)
    }

    // ==================== Queries ====================

    /// All lists
    pub fn lists(&self) -> &ListCollection {
        &self.lists
    }

    /// List names in display order
    pub fn list_names(&self) -> Vec<String> {
        self.lists.names().map(str::to_string).collect()
    }

    /// Name of the active list
    pub fn active_list_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Items of the active list (empty when none is active)
    pub fn active_items(&self) -> &[Item] {
        self.active
            .as_deref()
            .and_then(|name| self.lists.get(name))
            .unwrap_or(&[])
    }

    /// Transient input state
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Copy of the full collection
    pub fn snapshot(&self) -> ListCollection {
        self.lists.clone()
    }

    /// First `"List N"` (N from 1) not already in use
    pub fn generate_list_name(&self) -> String {
        (1..)
            .map(|n| format!("{} {}", LIST_NAME_PREFIX, n))
            .find(|name| !self.lists.contains(name))
            .unwrap_or_else(|| LIST_NAME_PREFIX.to_string())
    }

    /// Share text for the active list
    pub fn share_message(&self, label: &str) -> StoreResult<String> {
        let name = self.active.as_deref().ok_or(StoreError::NoActiveList)?;
        Ok(format_share_message(label, name, self.active_items()))
    }

    // ==================== Item Operations ====================

    /// Replace the item input text
    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        self.session.pending_text = text.into();
    }

    /// Add the pending item text (see `add_or_update_item`)
    pub fn submit_pending_text(&mut self) -> StoreResult<AddOutcome> {
        let text = self.session.pending_text.clone();
        self.add_or_update_item(&text)
    }

    /// Add an item, or overwrite the one under the edit cursor
    ///
    /// Blank text is rejected without touching anything. With no active list
    /// a new one is created around the item and selected.
    pub fn add_or_update_item(&mut self, text: &str) -> StoreResult<AddOutcome> {
        let name = text.trim();
        if name.is_empty() {
            return Ok(AddOutcome::Rejected);
        }
        let item = Item::new(name);

        let outcome = match self.active.clone() {
            None => {
                let list = self.generate_list_name();
                self.lists.insert(list.clone(), vec![item]);
                self.active = Some(list.clone());
                self.session.edit_cursor = None;
                AddOutcome::CreatedList { list, index: 0 }
            }
            Some(active) => {
                // A cursor taken on another list does not apply here
                let cursor = self
                    .session
                    .edit_cursor
                    .take()
                    .filter(|cursor| cursor.list == active);
                let items = self
                    .lists
                    .get_mut(&active)
                    .ok_or_else(|| StoreError::ListNotFound(active.clone()))?;

                match cursor {
                    Some(EditCursor { index, .. }) => {
                        let len = items.len();
                        let slot = items
                            .get_mut(index)
                            .ok_or(StoreError::IndexOutOfRange { index, len })?;
                        *slot = item;
                        AddOutcome::Replaced { index }
                    }
                    None => {
                        items.push(item);
                        AddOutcome::Appended {
                            index: items.len() - 1,
                        }
                    }
                }
            }
        };

        debug!(?outcome, "Item added");
        self.session.pending_text.clear();
        self.persist();
        Ok(outcome)
    }

    /// Flip the bought flag of an item in the active list
    pub fn toggle_bought(&mut self, index: usize) -> StoreResult<bool> {
        let items = self.active_items_mut()?;
        let len = items.len();
        let item = items
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        let bought = item.toggle();

        debug!(index, bought, "Item toggled");
        self.persist();
        Ok(bought)
    }

    /// Remove an item from the active list, keeping the order of the rest
    pub fn delete_item(&mut self, index: usize) -> StoreResult<Item> {
        let active = self.active.clone().ok_or(StoreError::NoActiveList)?;
        let items = self
            .lists
            .get_mut(&active)
            .ok_or_else(|| StoreError::ListNotFound(active.clone()))?;
        if index >= items.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: items.len(),
            });
        }
        let removed = items.remove(index);
        self.session.item_removed(&active, index);

        debug!(index, item = %removed.name, "Item deleted");
        self.persist();
        Ok(removed)
    }

    /// Load an item into the input and aim the next add at it
    ///
    /// Does not change any list.
    pub fn edit_item(&mut self, index: usize) -> StoreResult<String> {
        let active = self.active.clone().ok_or(StoreError::NoActiveList)?;
        let items = self.active_items();
        let name = items
            .get(index)
            .map(|item| item.name.clone())
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: items.len(),
            })?;

        self.session.pending_text = name.clone();
        self.session.edit_cursor = Some(EditCursor {
            list: active,
            index,
        });
        Ok(name)
    }

    /// Drop a pending in-place edit and clear the input
    pub fn cancel_edit(&mut self) {
        self.session.edit_cursor = None;
        self.session.pending_text.clear();
    }

    // ==================== List Operations ====================

    /// Show the "new list" prompt
    pub fn open_new_list_prompt(&mut self) {
        self.session.new_list_prompt_open = true;
    }

    /// Hide the "new list" prompt without creating anything
    pub fn cancel_new_list_prompt(&mut self) {
        self.session.new_list_prompt_open = false;
    }

    /// Create an empty list with a generated name and select it
    pub fn create_list(&mut self) -> String {
        let name = self.generate_list_name();
        self.lists.insert(name.clone(), Vec::new());
        self.active = Some(name.clone());
        self.session.new_list_prompt_open = false;
        self.cancel_rename();

        debug!(list = %name, "List created");
        self.persist();
        name
    }

    /// Start editing the active list's name
    pub fn begin_rename(&mut self) -> StoreResult<()> {
        let active = self.active.clone().ok_or(StoreError::NoActiveList)?;
        self.session.renaming = true;
        self.session.rename_buffer = active;
        Ok(())
    }

    /// Replace the rename input text
    pub fn set_rename_buffer(&mut self, text: impl Into<String>) {
        self.session.rename_buffer = text.into();
    }

    /// Leave rename mode without renaming
    pub fn cancel_rename(&mut self) {
        self.session.renaming = false;
        self.session.rename_buffer.clear();
    }

    /// Rename the active list to the rename input text
    pub fn commit_rename(&mut self) -> StoreResult<()> {
        let new_name = self.session.rename_buffer.clone();
        self.rename_active_list(&new_name)
    }

    /// Re-key the active list under a new name
    ///
    /// The list keeps its position and items. Blank names and names held
    /// by another list are rejected; renaming to the current name is a no-op.
    pub fn rename_active_list(&mut self, new_name: &str) -> StoreResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        let active = self.active.clone().ok_or(StoreError::NoActiveList)?;

        if new_name == active {
            self.cancel_rename();
            return Ok(());
        }
        if self.lists.contains(new_name) {
            return Err(StoreError::DuplicateName(new_name.to_string()));
        }
        if !self.lists.rename(&active, new_name.to_string()) {
            return Err(StoreError::ListNotFound(active));
        }

        self.session.list_renamed(&active, new_name);
        self.active = Some(new_name.to_string());
        self.cancel_rename();

        debug!(from = %active, to = %new_name, "List renamed");
        self.persist();
        Ok(())
    }

    /// Delete the active list and deselect it
    pub fn delete_active_list(&mut self) -> StoreResult<Vec<Item>> {
        let active = self.active.take().ok_or(StoreError::NoActiveList)?;
        let removed = self.lists.remove(&active).unwrap_or_default();
        self.session.list_removed(&active);

        debug!(list = %active, items = removed.len(), "List deleted");
        self.persist();
        Ok(removed)
    }

    /// Make an existing list the active one
    ///
    /// A rename in progress belongs to the previous list and is dropped.
    pub fn select_list(&mut self, name: &str) -> StoreResult<()> {
        if !self.lists.contains(name) {
            return Err(StoreError::ListNotFound(name.to_string()));
        }
        self.active = Some(name.to_string());
        self.cancel_rename();
        Ok(())
    }

    // ==================== Internals ====================

    fn active_items_mut(&mut self) -> StoreResult<&mut Vec<Item>> {
        let name = self.active.as_deref().ok_or(StoreError::NoActiveList)?;
        self.lists
            .get_mut(name)
            .ok_or_else(|| StoreError::ListNotFound(name.to_string()))
    }

    fn persist(&self) {
        self.sink.submit(self.lists.clone());
    }
}
