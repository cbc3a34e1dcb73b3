//! Applies search edits and deletions made elsewhere in the UI to a mounted
//! history store, matching entries by search id.

use crate::managers::history_store::HistoryStore;
use crate::types::history::{HistoryChange, HistoryState};

/// Applies `change` to the store. Returns whether the state changed.
///
/// Changes for searches that are not loaded are ignored; a later page will
/// carry the server's current version.
pub fn apply_change(store: &HistoryStore, change: HistoryChange) -> bool {
    let changed = store.update(|state| next_state(state, change));
    tracing::debug!(changed, "applied history change");
    changed
}

fn next_state(state: &HistoryState, change: HistoryChange) -> Option<HistoryState> {
    match change {
        HistoryChange::Edited { entry } => {
            let index = state.position_of(entry.search_id)?;
            if state.entries[index] == entry {
                return None;
            }
            let mut next = state.clone();
            next.entries[index] = entry;
            Some(next)
        }
        HistoryChange::Deleted { search_id } => {
            let index = state.position_of(search_id)?;
            let mut next = state.clone();
            next.entries.remove(index);
            Some(next)
        }
    }
}
