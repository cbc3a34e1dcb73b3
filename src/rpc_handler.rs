//! RPC method handler for the Tickerlens JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches JSON-RPC method calls to the `App`.

use std::sync::Arc;

use chrono::FixedOffset;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::app::App;
use crate::managers::history_store::HistoryStoreTrait;
use crate::managers::history_view::ViewContext;
use crate::managers::scroll_trigger::{ScrollMetrics, ScrollTrigger, TriggerOutcome};
use crate::services::search_codec;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::history::{HistoryChange, HistoryEntry};
use crate::types::session::AccessToken;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn u64_param(params: &Value, name: &str) -> Result<u64, String> {
    params
        .get(name)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| format!("missing {}", name))
}

/// Reads the optional `current_path` / `utc_offset_minutes` rendering params.
fn view_context(params: &Value) -> ViewContext {
    let mut ctx = ViewContext::default();
    ctx.current_path = params
        .get("current_path")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    if let Some(offset) = params
        .get("utc_offset_minutes")
        .and_then(|v| v.as_i64())
        .and_then(|m| i32::try_from(m * 60).ok())
        .and_then(FixedOffset::east_opt)
    {
        ctx.utc_offset = offset;
    }
    ctx
}

fn trigger_json(outcome: &TriggerOutcome) -> Value {
    match outcome {
        TriggerOutcome::Ignored => json!({"trigger": "ignored"}),
        TriggerOutcome::Throttled => json!({"trigger": "throttled"}),
        TriggerOutcome::Completed(fetch) => json!({"trigger": "completed", "fetch": fetch}),
        TriggerOutcome::Failed(err) => json!({"trigger": "failed", "error": err.to_string()}),
    }
}

async fn history_trigger(app: &Mutex<App>) -> Result<Arc<ScrollTrigger>, String> {
    let a = app.lock().await;
    let sidebar = a.history().map_err(|e| e.to_string())?;
    Ok(Arc::clone(sidebar.trigger()))
}

/// Current rows plus paging flags for the mounted sidebar.
async fn history_snapshot(app: &Mutex<App>, params: &Value) -> Result<Value, String> {
    let a = app.lock().await;
    let sidebar = a.history().map_err(|e| e.to_string())?;
    let state = sidebar.store().read();
    Ok(json!({
        "rows": sidebar.rows(&view_context(params)),
        "has_more": state.has_more,
        "next_page_cursor": state.next_page_cursor,
        "loading": sidebar.gate().is_loading(),
        "notifications": a.drain_notifications(),
    }))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Session ───
        "session.sign_in" => {
            let token = str_param(params, "access_token")?;
            if token.is_empty() {
                return Err("invalid access_token: must not be empty".to_string());
            }
            app.lock().await.sign_in(AccessToken::new(token));
            Ok(json!({"ok": true}))
        }
        "session.sign_out" => {
            app.lock().await.sign_out();
            Ok(json!({"ok": true}))
        }

        // ─── History ───
        "history.open" => {
            let trigger = {
                let mut a = app.lock().await;
                let sidebar = a.open_history().map_err(|e| e.to_string())?;
                Arc::clone(sidebar.trigger())
            };
            let outcome = trigger.on_near_end(ScrollMetrics::at_end()).await;
            let mut snapshot = history_snapshot(app, params).await?;
            snapshot["initial"] = trigger_json(&outcome);
            Ok(snapshot)
        }
        "history.scroll" => {
            let metrics: ScrollMetrics = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid scroll metrics: {}", e))?;
            let trigger = history_trigger(app).await?;
            let outcome = trigger.on_near_end(metrics).await;
            let mut snapshot = history_snapshot(app, params).await?;
            snapshot["trigger"] = trigger_json(&outcome);
            Ok(snapshot)
        }
        "history.next_page" => {
            let trigger = history_trigger(app).await?;
            let outcome = trigger.request_now().await;
            let mut snapshot = history_snapshot(app, params).await?;
            snapshot["trigger"] = trigger_json(&outcome);
            Ok(snapshot)
        }
        "history.state" => {
            let a = app.lock().await;
            let sidebar = a.history().map_err(|e| e.to_string())?;
            serde_json::to_value(sidebar.state()).map_err(|e| e.to_string())
        }
        "history.rows" => history_snapshot(app, params).await,
        "history.update_entry" => {
            let entry: HistoryEntry = params
                .get("entry")
                .cloned()
                .ok_or("missing entry")
                .and_then(|v| serde_json::from_value(v).map_err(|_| "invalid entry"))?;
            let a = app.lock().await;
            let changed = a.apply_history_change(HistoryChange::Edited { entry });
            Ok(json!({"changed": changed}))
        }
        "history.delete" => {
            let search_id = u64_param(params, "search_id")?;
            let a = app.lock().await;
            let removed = a.delete_search(search_id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "removed": removed}))
        }
        "history.close" => {
            app.lock().await.close_history();
            Ok(json!({"ok": true}))
        }

        // ─── Company search ───
        "company.search" => {
            let ticker = str_param(params, "ticker")?;
            if ticker.trim().is_empty() {
                return Err("invalid ticker: must not be empty".to_string());
            }
            let days_ago = params
                .get("days_ago")
                .and_then(|v| v.as_u64())
                .and_then(|d| u32::try_from(d).ok());
            let a = app.lock().await;
            let result = a
                .search_company(ticker, days_ago)
                .await
                .map_err(|e| e.to_string())?;
            serde_json::to_value(result).map_err(|e| e.to_string())
        }
        "search.get" => {
            let search_id = u64_param(params, "search_id")?;
            let a = app.lock().await;
            let detail = a.get_search(search_id).await.map_err(|e| e.to_string())?;
            serde_json::to_value(detail).map_err(|e| e.to_string())
        }
        "search.href" => {
            if let Some(id) = params.get("search_id").and_then(|v| v.as_u64()) {
                return Ok(json!({"href": search_codec::search_href(id)}));
            }
            let encoded = str_param(params, "encoded")?;
            let id = search_codec::decode_search_id(encoded).map_err(|e| e.to_string())?;
            Ok(json!({"search_id": id, "href": search_codec::search_href(id)}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().await;
            serde_json::to_value(a.settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().await;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Ping ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
