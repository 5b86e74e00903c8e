//! RPC method handler for the Labelmarks JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches the view's calls to the [`App`] view-model.
//! `refresh` is handled by the server itself because it needs the loader.

use std::collections::BTreeSet;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::label_selection::LabelSelectionTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::bookmark::Bookmark;

fn bookmark_json(b: &Bookmark) -> Value {
    json!({"id": b.id, "title": b.title, "url": b.url, "domain": b.domain, "labels": b.labels})
}

/// Reads `params.labels` as a set of strings. Missing means empty.
fn label_set(params: &Value) -> Result<BTreeSet<String>, String> {
    match params.get("labels") {
        None | Some(Value::Null) => Ok(BTreeSet::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(|| "labels must be strings".to_string()))
            .collect(),
        Some(_) => Err("labels must be an array".to_string()),
    }
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Labels ───
        "labels.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.labels()).map_err(|e| e.to_string())
        }
        "label.toggle" => {
            let label = params.get("label").and_then(|v| v.as_str()).ok_or("missing label")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let visible: Vec<Value> = a
                .toggle_label(label)
                .map_err(|e| e.to_string())?
                .iter()
                .map(bookmark_json)
                .collect();
            let selected = a.selection().selected_labels().contains(label);
            Ok(json!({"label": label, "selected": selected, "bookmarks": visible}))
        }

        // ─── Bookmarks ───
        "bookmarks.visible" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let arr: Vec<Value> = a.visible_bookmarks().iter().map(bookmark_json).collect();
            Ok(json!(arr))
        }
        "bookmarks.query" => {
            let labels = label_set(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.query(&labels).map_err(|e| e.to_string())?;
            let arr: Vec<Value> = outcome.bookmarks.iter().map(bookmark_json).collect();
            let skipped: Vec<String> = outcome.malformed.iter().map(|e| e.to_string()).collect();
            Ok(json!({"bookmarks": arr, "skipped": skipped}))
        }

        // ─── Document ───
        "document.stats" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.stats()).map_err(|e| e.to_string())
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
