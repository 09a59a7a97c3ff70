//! Property tests for the list store and its persistence

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use cartlist_core::storage::persistence::{decode, encode};
use cartlist_core::storage::MemoryBlobStore;
use cartlist_core::{ListCollection, ListStore, Persistence, SnapshotSink};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Edit(usize),
    CreateList,
    Rename(String),
    DeleteList,
    Select(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => "[ a-zA-Z]{0,8}".prop_map(Op::Add),
        2 => (0usize..6).prop_map(Op::Toggle),
        1 => (0usize..6).prop_map(Op::Delete),
        1 => (0usize..6).prop_map(Op::Edit),
        1 => Just(Op::CreateList),
        1 => prop_oneof!["List [1-4]", "[a-z ]{0,6}"].prop_map(Op::Rename),
        1 => Just(Op::DeleteList),
        1 => (0usize..5).prop_map(Op::Select),
    ]
}

/// Applies an operation, ignoring rejected ones the way a UI would
fn apply(store: &mut ListStore, op: &Op) {
    match op {
        Op::Add(text) => {
            let _ = store.add_or_update_item(text);
        }
        Op::Toggle(index) => {
            let _ = store.toggle_bought(*index);
        }
        Op::Delete(index) => {
            let _ = store.delete_item(*index);
        }
        Op::Edit(index) => {
            let _ = store.edit_item(*index);
        }
        Op::CreateList => {
            store.create_list();
        }
        Op::Rename(name) => {
            let _ = store.rename_active_list(name);
        }
        Op::DeleteList => {
            let _ = store.delete_active_list();
        }
        Op::Select(position) => {
            if let Some(name) = store.list_names().get(*position) {
                let _ = store.select_list(name);
            }
        }
    }
}

fn check_invariants(store: &ListStore) -> Result<(), TestCaseError> {
    let names = store.list_names();
    let distinct: HashSet<&String> = names.iter().collect();
    prop_assert_eq!(distinct.len(), names.len());

    if let Some(active) = store.active_list_name() {
        prop_assert!(store.lists().contains(active));
        if let Some(index) = store.session().cursor_for(active) {
            prop_assert!(index < store.active_items().len());
        }
    }

    for (_, items) in store.lists().iter() {
        for item in items {
            prop_assert!(!item.name.is_empty());
            prop_assert_eq!(item.name.trim(), item.name.as_str());
        }
    }

    let generated = store.generate_list_name();
    prop_assert!(!store.lists().contains(&generated));
    prop_assert_eq!(generated, store.generate_list_name());
    Ok(())
}

#[derive(Clone, Default)]
struct LastSnapshot(Arc<Mutex<Option<ListCollection>>>);

impl SnapshotSink for LastSnapshot {
    fn submit(&self, snapshot: ListCollection) {
        *self.0.lock().unwrap() = Some(snapshot);
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 0..60)) {
        let mut store = ListStore::in_memory();
        for op in &ops {
            apply(&mut store, op);
            check_invariants(&store)?;
        }
    }

    #[test]
    fn last_snapshot_matches_state(ops in prop::collection::vec(op(), 1..40)) {
        let sink = LastSnapshot::default();
        let mut store = ListStore::new(ListCollection::new(), Box::new(sink.clone()));
        for op in &ops {
            apply(&mut store, op);
        }

        let last = sink.0.lock().unwrap().clone();
        if let Some(last) = last {
            prop_assert_eq!(last, store.snapshot());
        } else {
            prop_assert!(store.lists().is_empty());
        }
    }

    #[test]
    fn encoded_snapshot_round_trips(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = ListStore::in_memory();
        for op in &ops {
            apply(&mut store, op);
        }

        let snapshot = store.snapshot();
        let decoded = decode(&encode(&snapshot).unwrap()).unwrap();
        prop_assert_eq!(
            decoded.names().collect::<Vec<_>>(),
            snapshot.names().collect::<Vec<_>>()
        );
        prop_assert_eq!(decoded, snapshot);
    }

    #[test]
    fn toggle_twice_is_identity(
        ops in prop::collection::vec(op(), 0..30),
        index in 0usize..6,
    ) {
        let mut store = ListStore::in_memory();
        for op in &ops {
            apply(&mut store, op);
        }
        let before = store.snapshot();

        if store.toggle_bought(index).is_ok() {
            store.toggle_bought(index).unwrap();
        }
        prop_assert_eq!(store.snapshot(), before);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn saved_state_loads_back(ops in prop::collection::vec(op(), 0..30)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (saved, loaded) = runtime.block_on(async {
            let blobs = MemoryBlobStore::new();
            let (mut store, saves) =
                ListStore::open_with(Persistence::new(Arc::new(blobs.clone()))).await;
            for op in &ops {
                apply(&mut store, op);
            }
            saves.flush().await;

            let persistence = Persistence::new(Arc::new(blobs));
            (store.snapshot(), persistence.load().await.unwrap_or_default())
        });

        prop_assert_eq!(loaded, saved);
    }
}
