//! JSON request/response API.
//!
//! Request: `{"id": any, "cmd": "dictionary.translate", "payload": {...}}`
//! Reply:   `{"id", "status": "ok", "payload"}` or
//!          `{"id", "status": "error", "kind", "message"}`

use std::time::Duration;

use juba_core::{DictionaryError, StoreError};
use juba_core::resolver::parse_query;
use juba_types::{EntryPatch, NewEntry};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::state::AppState;

mod command;
pub use command::Command;

#[derive(Debug, Default, Deserialize)]
struct TranslatePayload {
    phrase: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IdPayload {
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UpdatePayload {
    id: Option<String>,
    #[serde(flatten)]
    patch: EntryPatch,
}

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> Value {
    match req.get("payload") {
        None | Some(Value::Null) => json!({}),
        Some(v) => v.clone(),
    }
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, kind: &str, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "kind": kind,
        "message": message.into()
    })
    .to_string()
}

fn failure(id: Value, e: &DictionaryError) -> String {
    let mut body = json!({
        "id": id,
        "status": "error",
        "kind": e.kind(),
        "message": e.to_string()
    });
    if let DictionaryError::ValidationFailed { field, .. } = e {
        body["field"] = json!(field);
    }
    body.to_string()
}

/// Malformed payloads on write commands surface as validation failures.
fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T, DictionaryError> {
    serde_json::from_value(payload).map_err(|e| DictionaryError::invalid("payload", e.to_string()))
}

fn require_id(id: Option<String>) -> Result<String, DictionaryError> {
    id.filter(|id| !id.trim().is_empty())
        .ok_or_else(|| DictionaryError::missing("id"))
}

pub async fn handle(state: &AppState, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => return err(Value::Null, "invalid_request", "invalid json"),
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);
    tracing::info!("Request {} {}", cmd_str, id);

    let cmd = Command::from(cmd_str);
    if cmd == Command::Unknown {
        tracing::warn!("Unknown command '{}'", cmd_str);
        return err(id, "unknown_command", format!("unknown command '{cmd_str}'"));
    }

    let limit = Duration::from_millis(state.config.request_timeout_ms);
    let result = match tokio::time::timeout(limit, dispatch(state, cmd, payload)).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(state.config.request_timeout_ms).into()),
    };

    match result {
        Ok(payload) => ok(id, payload),
        Err(e) => {
            match &e {
                DictionaryError::StoreUnavailable(_) => {
                    tracing::error!("{} failed: {}", cmd_str, e)
                }
                _ => tracing::warn!("{} rejected: {}", cmd_str, e),
            }
            failure(id, &e)
        }
    }
}

async fn dispatch(
    state: &AppState,
    cmd: Command,
    payload: Value,
) -> Result<Value, DictionaryError> {
    let service = &state.service;

    match cmd {
        Command::Health => Ok(json!({ "status": "API is running" })),

        Command::List => {
            let entries = service.list().await?;
            Ok(json!(entries))
        }

        Command::Translate => {
            // A payload that is not an object carries neither parameter
            let query: TranslatePayload = serde_json::from_value(payload).unwrap_or_default();
            let (phrase, source) = parse_query(query.phrase.as_deref(), query.source.as_deref())?;
            let translation = service.translate(&phrase, source).await?;
            Ok(json!(translation))
        }

        Command::Create => {
            let entry: NewEntry = parse_payload(payload)?;
            let stored = service.create(entry).await?;
            Ok(json!(stored))
        }

        Command::Update => {
            let UpdatePayload { id, patch } = parse_payload(payload)?;
            let id = require_id(id)?;
            let updated = service.update(&id, patch).await?;
            Ok(json!(updated))
        }

        Command::Delete => {
            let IdPayload { id } = parse_payload(payload)?;
            let id = require_id(id)?;
            service.delete(&id).await?;
            Ok(json!({ "message": "Entry deleted" }))
        }

        Command::Unknown => Err(DictionaryError::missing("cmd")),
    }
}
