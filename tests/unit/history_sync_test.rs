//! Unit tests for applying external search edits and deletions.

#[path = "../common/mod.rs"]
mod common;

use pretty_assertions::assert_eq;

use common::{entry, ids};
use tickerlens::managers::history_store::{HistoryStore, HistoryStoreTrait};
use tickerlens::managers::history_sync::apply_change;
use tickerlens::types::history::{HistoryChange, HistoryState};

fn loaded() -> HistoryState {
    HistoryState {
        label: "Search History".to_string(),
        entries: vec![entry(3), entry(2), entry(1)],
        has_more: true,
        next_page_cursor: 2,
    }
}

#[test]
fn test_edit_replaces_entry_in_place() {
    let store = HistoryStore::with_state(loaded());
    let mut edited = entry(2);
    edited.label = "Renamed Co".to_string();
    edited.active = true;

    assert!(apply_change(&store, HistoryChange::Edited { entry: edited.clone() }));

    let state = store.read();
    assert_eq!(ids(&state.entries), vec![3, 2, 1]);
    assert_eq!(state.entries[1], edited);
    assert_eq!(state.next_page_cursor, 2);
}

#[test]
fn test_edit_of_unloaded_or_identical_entry_is_noop() {
    let store = HistoryStore::with_state(loaded());

    assert!(!apply_change(&store, HistoryChange::Edited { entry: entry(99) }));
    assert!(!apply_change(&store, HistoryChange::Edited { entry: entry(1) }));
    assert_eq!(store.read(), loaded());
}

#[test]
fn test_delete_removes_entry_and_keeps_paging_state() {
    let store = HistoryStore::with_state(loaded());

    assert!(apply_change(&store, HistoryChange::Deleted { search_id: 2 }));

    let state = store.read();
    assert_eq!(ids(&state.entries), vec![3, 1]);
    assert!(state.has_more);
    assert_eq!(state.next_page_cursor, 2);
    assert!(!apply_change(&store, HistoryChange::Deleted { search_id: 2 }));
}

#[test]
fn test_changes_ignored_after_close() {
    let store = HistoryStore::with_state(loaded());
    store.close();

    assert!(!apply_change(&store, HistoryChange::Deleted { search_id: 3 }));
    assert_eq!(store.read(), loaded());
}

#[test]
fn test_change_wire_format() {
    let change: HistoryChange =
        serde_json::from_str(r#"{"kind":"deleted","search_id":7}"#).unwrap();
    assert_eq!(change, HistoryChange::Deleted { search_id: 7 });
}
