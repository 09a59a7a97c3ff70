//! Item command handlers

use anyhow::{bail, Context, Result};

use cartlist_core::{AddOutcome, ListStore};

use super::{item_error, item_index, select};
use crate::output::Output;

/// Add an item to a list, or start a new list when none is given
pub fn add(
    store: &mut ListStore,
    text: String,
    list: Option<String>,
    output: &Output,
) -> Result<()> {
    if let Some(list) = &list {
        select(store, list)?;
    }

    match store
        .add_or_update_item(&text)
        .context("Failed to add item")?
    {
        AddOutcome::Rejected => bail!("Item text cannot be empty"),
        AddOutcome::CreatedList { list, .. } => {
            output.success(&format!("Created {} with '{}'", list, text.trim()));
        }
        AddOutcome::Appended { index } | AddOutcome::Replaced { index } => {
            let list = store.active_list_name().unwrap_or_default();
            output.success(&format!("Added '{}' to {} as #{}", text.trim(), list, index + 1));
        }
    }
    Ok(())
}

/// Overwrite an item's text (the item starts out not bought again)
pub fn edit(
    store: &mut ListStore,
    list: String,
    number: usize,
    text: String,
    output: &Output,
) -> Result<()> {
    select(store, &list)?;
    let index = item_index(number)?;

    let old = store
        .edit_item(index)
        .map_err(item_error(number))
        .context("Failed to edit item")?;
    match store
        .add_or_update_item(&text)
        .context("Failed to edit item")?
    {
        AddOutcome::Rejected => {
            store.cancel_edit();
            bail!("Item text cannot be empty");
        }
        _ => {
            output.success(&format!("Changed '{}' to '{}'", old, text.trim()));
        }
    }
    Ok(())
}

/// Flip an item between bought and not bought
pub fn toggle(store: &mut ListStore, list: String, number: usize, output: &Output) -> Result<()> {
    select(store, &list)?;
    let index = item_index(number)?;

    let bought = store
        .toggle_bought(index)
        .map_err(item_error(number))
        .context("Failed to toggle item")?;
    let name = &store.active_items()[index].name;
    if bought {
        output.success(&format!("Marked '{}' as bought", name));
    } else {
        output.success(&format!("Marked '{}' as not bought", name));
    }
    Ok(())
}

/// Remove an item from a list
pub fn remove(store: &mut ListStore, list: String, number: usize, output: &Output) -> Result<()> {
    select(store, &list)?;
    let index = item_index(number)?;

    let item = store
        .delete_item(index)
        .map_err(item_error(number))
        .context("Failed to delete item")?;
    output.success(&format!("Removed '{}' from {}", item.name, list));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn names(store: &ListStore) -> Vec<String> {
        store
            .active_items()
            .iter()
            .map(|item| item.name.clone())
            .collect()
    }

    #[test]
    fn test_add_without_list_starts_one() {
        let mut store = ListStore::in_memory();
        add(&mut store, "Milk".to_string(), None, &quiet()).unwrap();
        add(&mut store, "Bread".to_string(), None, &quiet()).unwrap();

        // Without --list each add appends to the list it just created
        assert_eq!(store.list_names(), vec!["List 1"]);
        assert_eq!(names(&store), vec!["Milk", "Bread"]);
    }

    #[test]
    fn test_add_to_named_list() {
        let mut store = ListStore::in_memory();
        store.create_list();
        store.create_list();

        add(&mut store, "Eggs".to_string(), Some("List 1".to_string()), &quiet()).unwrap();
        assert_eq!(store.lists().get("List 1").unwrap().len(), 1);
        assert!(store.lists().get("List 2").unwrap().is_empty());
    }

    #[test]
    fn test_add_blank_is_an_error() {
        let mut store = ListStore::in_memory();
        assert!(add(&mut store, "   ".to_string(), None, &quiet()).is_err());
        assert!(store.lists().is_empty());
    }

    #[test]
    fn test_edit_toggle_remove_use_item_numbers() {
        let mut store = ListStore::in_memory();
        store.add_or_update_item("Milk").unwrap();
        store.add_or_update_item("Bread").unwrap();
        let list = "List 1".to_string();

        toggle(&mut store, list.clone(), 2, &quiet()).unwrap();
        assert!(store.active_items()[1].bought);

        edit(&mut store, list.clone(), 2, "Rye bread".to_string(), &quiet()).unwrap();
        assert_eq!(names(&store), vec!["Milk", "Rye bread"]);
        assert!(!store.active_items()[1].bought);

        remove(&mut store, list.clone(), 1, &quiet()).unwrap();
        assert_eq!(names(&store), vec!["Rye bread"]);

        assert!(remove(&mut store, list.clone(), 0, &quiet()).is_err());
        assert!(toggle(&mut store, list, 5, &quiet()).is_err());
    }

    #[test]
    fn test_missing_item_is_reported_by_number() {
        let mut store = ListStore::in_memory();
        store.add_or_update_item("Milk").unwrap();
        let list = "List 1".to_string();

        let err = toggle(&mut store, list.clone(), 6, &quiet()).unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "Failed to toggle item: There is no item 6 (list has 1 items)"
        );

        let err = remove(&mut store, list.clone(), 2, &quiet()).unwrap_err();
        assert!(format!("{:#}", err).contains("no item 2"));
        let err = edit(&mut store, list, 3, "Eggs".to_string(), &quiet()).unwrap_err();
        assert!(format!("{:#}", err).contains("no item 3"));
        assert_eq!(names(&store), vec!["Milk"]);
    }

    #[test]
    fn test_edit_blank_keeps_item() {
        let mut store = ListStore::in_memory();
        store.add_or_update_item("Milk").unwrap();

        assert!(edit(&mut store, "List 1".to_string(), 1, " ".to_string(), &quiet()).is_err());
        assert_eq!(names(&store), vec!["Milk"]);
        assert!(store.session().edit_cursor.is_none());
    }
}
