use serde::{Deserialize, Serialize};

/// A single search the user ran, as listed in the history sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub search_id: u64,
    pub ticker: String,
    pub href: String,
    /// Company name shown next to the ticker.
    #[serde(default)]
    pub label: String,
    pub created_at: String,
    #[serde(default)]
    pub active: bool,
}

/// One page of search history as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryPage {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub searches: Vec<HistoryEntry>,
    #[serde(default)]
    pub has_more: bool,
}

/// Client-held view of the paged history list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryState {
    pub label: String,
    pub entries: Vec<HistoryEntry>,
    pub has_more: bool,
    pub next_page_cursor: u32,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            label: String::new(),
            entries: Vec::new(),
            has_more: true,
            next_page_cursor: 1,
        }
    }
}

impl HistoryState {
    /// Returns the position of the entry with the given id, if loaded.
    pub fn position_of(&self, search_id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.search_id == search_id)
    }

    /// Builds the state that results from appending a successfully fetched page.
    ///
    /// Entries whose id is already present are skipped; the cursor advances by one.
    pub fn merged_with(&self, page: HistoryPage) -> HistoryState {
        let mut entries = self.entries.clone();
        for entry in page.searches {
            if entries.iter().any(|e| e.search_id == entry.search_id) {
                tracing::debug!(search_id = entry.search_id, "skipping duplicate history entry");
                continue;
            }
            entries.push(entry);
        }

        let label = if page.label.is_empty() {
            self.label.clone()
        } else {
            page.label
        };

        HistoryState {
            label,
            entries,
            has_more: page.has_more,
            next_page_cursor: self.next_page_cursor + 1,
        }
    }
}

/// A mutation made to a search elsewhere in the UI that the sidebar must reflect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryChange {
    Edited { entry: HistoryEntry },
    Deleted { search_id: u64 },
}
