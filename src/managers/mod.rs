// Tickerlens state managers
// Managers own the search-history sidebar and the paging state behind it.

pub mod fetch_gate;
pub mod history_sidebar;
pub mod history_store;
pub mod history_sync;
pub mod history_view;
pub mod scroll_trigger;
