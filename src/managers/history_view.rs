//! History Rendering View.
//!
//! Pure mapping from `HistoryState` to the rows the sidebar draws.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use serde::Serialize;

use crate::types::history::{HistoryEntry, HistoryState};

const DATE_FORMAT: &str = "%b %d, %Y %H:%M";

/// One drawable sidebar row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum HistoryRow {
    Label { text: String },
    Entry(EntryRow),
    Loading,
}

/// A search in the sidebar, keyed by its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRow {
    pub key: u64,
    pub ticker: String,
    pub icon_path: String,
    pub label: String,
    pub date: String,
    pub href: String,
    pub selected: bool,
}

/// Rendering inputs that do not live in the store.
#[derive(Debug, Clone)]
pub struct ViewContext {
    /// Route currently shown in the main pane.
    pub current_path: Option<String>,
    /// The user's timezone.
    pub utc_offset: FixedOffset,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            current_path: None,
            utc_offset: Utc.fix(),
        }
    }
}

/// Builds the sidebar rows for `state`.
pub fn render(state: &HistoryState, is_loading: bool, ctx: &ViewContext) -> Vec<HistoryRow> {
    let mut rows = Vec::with_capacity(state.entries.len() + 2);

    if !state.label.is_empty() {
        rows.push(HistoryRow::Label {
            text: state.label.clone(),
        });
    }

    rows.extend(
        state
            .entries
            .iter()
            .map(|entry| HistoryRow::Entry(entry_row(entry, ctx))),
    );

    if is_loading && state.has_more {
        rows.push(HistoryRow::Loading);
    }

    rows
}

fn entry_row(entry: &HistoryEntry, ctx: &ViewContext) -> EntryRow {
    let selected = entry.active || ctx.current_path.as_deref() == Some(entry.href.as_str());
    EntryRow {
        key: entry.search_id,
        ticker: entry.ticker.clone(),
        icon_path: format!("/icons/small/{}.svg", entry.ticker),
        label: entry.label.clone(),
        date: format_created_at(&entry.created_at, &ctx.utc_offset),
        href: entry.href.clone(),
        selected,
    }
}

/// Formats a server timestamp in the user's timezone.
///
/// Accepts RFC 3339, RFC 2822 (the backend's default), and naive ISO
/// timestamps taken as UTC. Anything else is returned unchanged.
pub fn format_created_at(raw: &str, offset: &FixedOffset) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.with_timezone(offset).format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
