//! Command handlers

pub mod config;
pub mod item;
pub mod list;
pub mod share;

use anyhow::{anyhow, bail, Context, Result};

use cartlist_core::{ListStore, StoreError};

/// Make the named list active
pub fn select(store: &mut ListStore, list: &str) -> Result<()> {
    store
        .select_list(list)
        .with_context(|| format!("Cannot use list '{}'", list))
}

/// Convert an item number as typed (from 1) to an index
pub fn item_index(number: usize) -> Result<usize> {
    if number == 0 {
        bail!("Item numbers start at 1");
    }
    Ok(number - 1)
}

/// Report a store error against the item number as typed
pub fn item_error(number: usize) -> impl Fn(StoreError) -> anyhow::Error {
    move |e| match e {
        StoreError::IndexOutOfRange { len, .. } => {
            anyhow!("There is no item {} (list has {} items)", number, len)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_index() {
        assert_eq!(item_index(1).unwrap(), 0);
        assert_eq!(item_index(12).unwrap(), 11);
        assert!(item_index(0).is_err());
    }

    #[test]
    fn test_item_error_uses_typed_number() {
        let err = item_error(6)(StoreError::IndexOutOfRange { index: 5, len: 1 });
        assert_eq!(err.to_string(), "There is no item 6 (list has 1 items)");

        let err = item_error(1)(StoreError::NoActiveList);
        assert!(err.downcast_ref::<StoreError>().is_some());
    }

    #[test]
    fn test_select_missing_list() {
        let mut store = ListStore::in_memory();
        let err = select(&mut store, "Weekend").unwrap_err();
        assert!(err.to_string().contains("Weekend"));
    }
}
