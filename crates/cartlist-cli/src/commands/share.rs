//! Share command handler

use std::io;

use anyhow::{Context, Result};

use cartlist_core::{ListStore, ShareTarget};

use super::select;
use crate::output::Output;

/// Share a list through a messaging app
///
/// `open` hands the deep link to the system; the binary passes
/// `open::that`. With `print` the message is written to stdout instead and
/// `open` is never called. Unknown targets share nothing.
pub fn share(
    store: &mut ListStore,
    list: String,
    target: String,
    print: bool,
    label: &str,
    output: &Output,
    open: impl FnOnce(&str) -> io::Result<()>,
) -> Result<()> {
    select(store, &list)?;

    let target: ShareTarget = match target.parse() {
        Ok(target) => target,
        Err(e) => {
            output.message(&format!("{}, nothing shared", e));
            return Ok(());
        }
    };

    let message = store.share_message(label)?;
    let url = target.url(&message);

    if print {
        output.print_share(target.id(), &message, &url);
        return Ok(());
    }

    open(&url).with_context(|| format!("Failed to open {}", target))?;
    output.success(&format!("Shared {} to {}", list, target));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use std::cell::RefCell;

    fn milk_store() -> ListStore {
        let mut store = ListStore::in_memory();
        store.add_or_update_item("Milk").unwrap();
        store
    }

    fn run(
        store: &mut ListStore,
        target: &str,
        print: bool,
        opened: &RefCell<Vec<String>>,
    ) -> Result<()> {
        share(
            store,
            "List 1".to_string(),
            target.to_string(),
            print,
            "Shopping list",
            &Output::new(OutputFormat::Quiet),
            |url| {
                opened.borrow_mut().push(url.to_string());
                Ok(())
            },
        )
    }

    #[test]
    fn test_known_target_opens_deep_link() {
        let mut store = milk_store();
        let opened = RefCell::new(Vec::new());

        run(&mut store, "sms", false, &opened).unwrap();

        assert_eq!(
            opened.into_inner(),
            vec!["sms:?body=Shopping%20list%3A%20List%201%0A%0AMilk".to_string()]
        );
    }

    #[test]
    fn test_unknown_target_opens_nothing() {
        let mut store = milk_store();
        let opened = RefCell::new(Vec::new());

        run(&mut store, "carrier-pigeon", false, &opened).unwrap();

        assert!(opened.borrow().is_empty());
        assert_eq!(store.active_list_name(), Some("List 1"));
    }

    #[test]
    fn test_print_does_not_open() {
        let mut store = milk_store();
        let opened = RefCell::new(Vec::new());

        run(&mut store, "SMS", true, &opened).unwrap();

        assert!(opened.borrow().is_empty());
    }

    #[test]
    fn test_open_failure_is_reported() {
        let mut store = milk_store();

        let err = share(
            &mut store,
            "List 1".to_string(),
            "whatsapp".to_string(),
            false,
            "Shopping list",
            &Output::new(OutputFormat::Quiet),
            |_| Err(io::Error::new(io::ErrorKind::NotFound, "no handler")),
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to open whatsapp"));
    }

    #[test]
    fn test_missing_list_is_an_error() {
        let mut store = ListStore::in_memory();
        let opened = RefCell::new(Vec::new());

        assert!(run(&mut store, "sms", true, &opened).is_err());
        assert!(opened.borrow().is_empty());
    }
}
