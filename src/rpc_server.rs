//! Labelmarks RPC Server: JSON-RPC over stdin/stdout for the UI layer.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"label.toggle", "params":{"label":"rust"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries only protocol lines. `refresh` and the
//! loader side of `settings.set` are handled here, next to the loader.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use labelmarks::app::App;
use labelmarks::database::Database;
use labelmarks::managers::cache_store::SqliteCacheStore;
use labelmarks::platform;
use labelmarks::rpc_handler::handle_method;
use labelmarks::services::bookmark_loader::BookmarkLoader;
use labelmarks::services::fetcher::HttpFetcher;
use labelmarks::services::refresh_policy::now_epoch_millis;
use labelmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use labelmarks::types::settings::LoaderSettings;

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

type Loader = BookmarkLoader<SqliteCacheStore, HttpFetcher>;

fn emit(value: &Value) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", value);
    let _ = out.flush();
}

fn database_path(configured: Option<&str>) -> PathBuf {
    if let Some(path) = configured {
        return PathBuf::from(path);
    }
    let dir = std::env::var("LABELMARKS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| platform::get_data_dir());
    dir.join("labelmarks.db")
}

fn build_loader(settings: &LoaderSettings) -> Result<Loader, Box<dyn std::error::Error>> {
    let db_path = database_path(settings.database_path.as_deref());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Arc::new(Database::open(&db_path)?);
    let fetcher = HttpFetcher::new(settings.request_timeout_secs)?;
    Ok(BookmarkLoader::new(SqliteCacheStore::new(db), fetcher, settings))
}

/// Brings the loader in line with settings changed over RPC.
///
/// URL and TTL changes apply in place; a new timeout or database path needs
/// a new fetcher or connection, so the loader is rebuilt.
fn apply_settings(loader: &mut Loader, active: &mut LoaderSettings, app: &Mutex<App>) -> Result<(), String> {
    let updated = app
        .lock()
        .map_err(|e| e.to_string())?
        .settings_engine
        .get_settings()
        .clone();
    let needs_rebuild = updated.request_timeout_secs != active.request_timeout_secs
        || updated.database_path != active.database_path;
    if needs_rebuild {
        *loader = build_loader(&updated).map_err(|e| e.to_string())?;
        tracing::info!("loader rebuilt for new settings");
    } else {
        loader.reconfigure(&updated);
    }
    *active = updated;
    Ok(())
}

/// Runs a loader future and installs the resulting document.
fn load_into(app: &Mutex<App>, runtime: &tokio::runtime::Runtime, loader: &Loader, force: bool) -> Result<Value, String> {
    let now = now_epoch_millis();
    let outcome = runtime
        .block_on(async {
            if force {
                loader.refresh(now).await
            } else {
                loader.init(now).await
            }
        })
        .map_err(|e| e.to_string())?;
    let source = format!("{:?}", outcome.source);
    let mut a = app.lock().map_err(|e| e.to_string())?;
    a.install_document(outcome.document);
    Ok(json!({"source": source, "stats": a.stats()}))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LABELMARKS_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut settings_engine = SettingsEngine::new(None);
    if let Err(err) = settings_engine.load() {
        tracing::warn!(error = %err, "using default settings");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut active = settings_engine.get_settings().clone();
    let mut loader = build_loader(&active)?;
    let app = Mutex::new(App::new(settings_engine));

    let initial = load_into(&app, &runtime, &loader, false);
    if let Err(err) = &initial {
        tracing::error!(error = %err, "no bookmarks available at start-up");
    }
    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION"), "loaded": initial.is_ok()}));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let result = match method {
            "refresh" => load_into(&app, &runtime, &loader, true),
            "settings.set" => handle_method(&app, method, &params)
                .and_then(|val| apply_settings(&mut loader, &mut active, &app).map(|()| val)),
            _ => handle_method(&app, method, &params),
        };

        let response = match result {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        emit(&response);
    }
    Ok(())
}
