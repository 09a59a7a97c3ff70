//! List command handlers

use anyhow::{Context, Result};

use cartlist_core::ListStore;

use super::select;
use crate::output::Output;
use crate::prompt::confirm;

/// Show every list with its progress
pub fn lists(store: &ListStore, output: &Output) -> Result<()> {
    output.print_lists(store.lists());
    Ok(())
}

/// Show the items of one list, or of all lists
pub fn show(store: &mut ListStore, list: Option<String>, output: &Output) -> Result<()> {
    if let Some(list) = list {
        select(store, &list)?;
        output.print_list(&list, store.active_items());
        return Ok(());
    }

    if output.is_json() || store.lists().is_empty() {
        output.print_lists(store.lists());
        return Ok(());
    }

    for (i, (name, items)) in store.lists().iter().enumerate() {
        if i > 0 && !output.is_quiet() {
            println!();
        }
        output.print_list(name, items);
    }
    Ok(())
}

/// Create an empty list with the next free name
pub fn new(store: &mut ListStore, output: &Output) -> Result<()> {
    let name = store.create_list();

    if output.is_quiet() {
        println!("{}", name);
    } else {
        output.success(&format!("Created {}", name));
    }
    Ok(())
}

/// Rename a list
pub fn rename(store: &mut ListStore, list: String, new_name: String, output: &Output) -> Result<()> {
    select(store, &list)?;
    store
        .rename_active_list(&new_name)
        .context("Failed to rename list")?;

    let renamed = store.active_list_name().unwrap_or_default();
    output.success(&format!("Renamed {} to {}", list, renamed));
    Ok(())
}

/// Delete a list and all its items
pub fn delete(store: &mut ListStore, list: String, yes: bool, output: &Output) -> Result<()> {
    select(store, &list)?;

    // Confirm deletion
    if output.should_prompt() && !yes {
        println!(
            "Delete list: {} ({} items)",
            list,
            store.active_items().len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let items = store
        .delete_active_list()
        .context("Failed to delete list")?;
    output.success(&format!("Deleted {} ({} items)", list, items.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_new_and_rename() {
        let mut store = ListStore::in_memory();
        new(&mut store, &quiet()).unwrap();
        new(&mut store, &quiet()).unwrap();
        assert_eq!(store.list_names(), vec!["List 1", "List 2"]);

        rename(&mut store, "List 1".to_string(), "  Groceries ".to_string(), &quiet()).unwrap();
        assert_eq!(store.list_names(), vec!["Groceries", "List 2"]);
    }

    #[test]
    fn test_rename_to_taken_name_fails() {
        let mut store = ListStore::in_memory();
        store.create_list();
        store.create_list();

        let err = rename(&mut store, "List 2".to_string(), "List 1".to_string(), &quiet());
        assert!(err.is_err());
        assert_eq!(store.list_names(), vec!["List 1", "List 2"]);
    }

    #[test]
    fn test_delete_skips_prompt_when_not_human() {
        let mut store = ListStore::in_memory();
        store.add_or_update_item("Milk").unwrap();
        store.create_list();

        delete(&mut store, "List 1".to_string(), false, &quiet()).unwrap();
        assert_eq!(store.list_names(), vec!["List 2"]);
        assert!(delete(&mut store, "List 1".to_string(), true, &quiet()).is_err());
    }

    #[test]
    fn test_show_unknown_list() {
        let mut store = ListStore::in_memory();
        assert!(show(&mut store, Some("Nope".to_string()), &quiet()).is_err());
        assert!(show(&mut store, None, &quiet()).is_ok());
    }
}
