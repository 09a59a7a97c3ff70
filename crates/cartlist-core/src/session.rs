//! Transient interaction state
//!
//! What the user is in the middle of doing: the text typed into the item
//! input, which item an edit will overwrite, and whether the new-list or
//! rename prompts are open. None of this is persisted.

/// Marks the item a pending add will overwrite instead of append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCursor {
    /// List the cursor was taken on
    pub list: String,
    /// Index into that list's items
    pub index: usize,
}

/// Interaction state kept beside the domain state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    /// Text in the item input
    pub pending_text: String,
    /// In-place edit target, consumed by the next add
    pub edit_cursor: Option<EditCursor>,
    /// Whether the "new list" prompt is showing
    pub new_list_prompt_open: bool,
    /// Whether the active list's name is being edited
    pub renaming: bool,
    /// Text in the rename input
    pub rename_buffer: String,
}

impl EditSession {
    /// Cursor index, but only if it was taken on `list`
    pub fn cursor_for(&self, list: &str) -> Option<usize> {
        self.edit_cursor
            .as_ref()
            .filter(|cursor| cursor.list == list)
            .map(|cursor| cursor.index)
    }

    /// Whether an in-place edit is pending on `list`
    pub fn is_editing(&self, list: &str) -> bool {
        self.cursor_for(list).is_some()
    }

    /// Keep the cursor valid after `index` was removed from `list`
    pub(crate) fn item_removed(&mut self, list: &str, index: usize) {
        let Some(cursor) = self.edit_cursor.as_mut() else {
            return;
        };
        if cursor.list != list {
            return;
        }
        if cursor.index == index {
            self.edit_cursor = None;
        } else if cursor.index > index {
            cursor.index -= 1;
        }
    }

    /// Follow a list rename
    pub(crate) fn list_renamed(&mut self, from: &str, to: &str) {
        if let Some(cursor) = self.edit_cursor.as_mut() {
            if cursor.list == from {
                cursor.list = to.to_string();
            }
        }
    }

    /// Forget anything tied to a deleted list
    pub(crate) fn list_removed(&mut self, list: &str) {
        if self
            .edit_cursor
            .as_ref()
            .is_some_and(|cursor| cursor.list == list)
        {
            self.edit_cursor = None;
        }
        self.renaming = false;
        self.rename_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_cursor(list: &str, index: usize) -> EditSession {
        EditSession {
            edit_cursor: Some(EditCursor {
                list: list.to_string(),
                index,
            }),
            ..EditSession::default()
        }
    }

    #[test]
    fn test_cursor_for_other_list() {
        let session = session_with_cursor("List 1", 2);
        assert_eq!(session.cursor_for("List 1"), Some(2));
        assert_eq!(session.cursor_for("List 2"), None);
    }

    #[test]
    fn test_item_removed_shifts_cursor() {
        let mut session = session_with_cursor("List 1", 3);
        session.item_removed("List 1", 1);
        assert_eq!(session.cursor_for("List 1"), Some(2));

        session.item_removed("List 1", 5);
        assert_eq!(session.cursor_for("List 1"), Some(2));

        session.item_removed("List 1", 2);
        assert!(session.edit_cursor.is_none());
    }

    #[test]
    fn test_item_removed_other_list() {
        let mut session = session_with_cursor("List 1", 0);
        session.item_removed("List 2", 0);
        assert_eq!(session.cursor_for("List 1"), Some(0));
    }

    #[test]
    fn test_list_renamed() {
        let mut session = session_with_cursor("List 1", 1);
        session.list_renamed("List 1", "Groceries");
        assert_eq!(session.cursor_for("Groceries"), Some(1));
    }
}
