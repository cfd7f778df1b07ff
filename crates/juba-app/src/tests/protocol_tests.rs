use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use juba_config::Config;
use juba_core::{DictionaryStore, StoreError, ValidEntry, ValidPatch};
use juba_types::{DictionaryEntry, Direction};
use serde_json::{Value, json};

use super::memory_state;
use crate::protocol::handle;
use crate::state::AppState;

async fn call(state: &AppState, request: Value) -> Value {
    let reply = handle(state, &request.to_string()).await;
    serde_json::from_str(&reply).expect("reply is json")
}

async fn create(state: &AppState, english: &str, arabi_juba: &str) -> Value {
    let reply = call(
        state,
        json!({
            "id": 0,
            "cmd": "dictionary.create",
            "payload": { "englishPhrase": english, "arabiJubaPhrase": arabi_juba }
        }),
    )
    .await;
    assert_eq!(reply["status"], "ok", "create failed: {reply}");
    reply["payload"].clone()
}

#[tokio::test]
async fn test_health() {
    let state = memory_state();

    let reply = call(&state, json!({ "id": "h1", "cmd": "health" })).await;
    assert_eq!(reply["id"], "h1");
    assert_eq!(reply["status"], "ok");
    assert_eq!(reply["payload"]["status"], "API is running");
}

#[tokio::test]
async fn test_create_normalizes_and_defaults() {
    let state = memory_state();

    let entry = create(&state, "  Hello ", "SALAM").await;
    assert_eq!(entry["englishPhrase"], "hello");
    assert_eq!(entry["arabiJubaPhrase"], "salam");
    assert_eq!(entry["category"], "general");
    assert_eq!(entry["notes"], "");
    assert!(entry["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_translate_exact_and_composed() {
    let state = memory_state();
    create(&state, "hello", "salam").await;
    create(&state, "friend", "sadiq").await;

    let reply = call(
        &state,
        json!({
            "id": 1,
            "cmd": "dictionary.translate",
            "payload": { "phrase": "Hello", "source": "english" }
        }),
    )
    .await;
    assert_eq!(
        reply["payload"],
        json!({
            "englishPhrase": "hello",
            "arabiJubaPhrase": "salam",
            "notes": "",
            "match": "exact"
        })
    );

    let reply = call(
        &state,
        json!({
            "id": 2,
            "cmd": "dictionary.translate",
            "payload": { "phrase": "hello friend", "source": "english" }
        }),
    )
    .await;
    assert_eq!(
        reply["payload"],
        json!({
            "englishPhrase": "hello friend",
            "arabiJubaPhrase": "salam sadiq",
            "match": "composed"
        })
    );
}

#[tokio::test]
async fn test_translate_parameter_errors() {
    let state = memory_state();

    for payload in [
        json!({ "phrase": "hello" }),
        json!({ "source": "english" }),
        json!({ "phrase": "  ", "source": "english" }),
        json!({ "phrase": "hello", "source": "french" }),
        json!("hello"),
    ] {
        let reply = call(
            &state,
            json!({ "id": 3, "cmd": "dictionary.translate", "payload": payload }),
        )
        .await;
        assert_eq!(reply["status"], "error");
        assert_eq!(reply["kind"], "missing_parameter", "payload: {payload}");
    }
}

#[tokio::test]
async fn test_invalid_create_is_rejected_with_field() {
    let state = memory_state();

    let reply = call(
        &state,
        json!({
            "id": 4,
            "cmd": "dictionary.create",
            "payload": { "englishPhrase": "hello", "arabiJubaPhrase": "  " }
        }),
    )
    .await;
    assert_eq!(reply["kind"], "validation_failed");
    assert_eq!(reply["field"], "arabiJubaPhrase");

    let reply = call(
        &state,
        json!({
            "id": 5,
            "cmd": "dictionary.create",
            "payload": { "englishPhrase": "hello", "arabiJubaPhrase": "salam", "category": "sports" }
        }),
    )
    .await;
    assert_eq!(reply["kind"], "validation_failed");

    let reply = call(&state, json!({ "id": 6, "cmd": "dictionary.list" })).await;
    assert_eq!(reply["payload"], json!([]));
}

#[tokio::test]
async fn test_update_and_delete() {
    let state = memory_state();
    let entry = create(&state, "thanks", "shukran").await;
    let id = entry["id"].as_str().unwrap();

    let reply = call(
        &state,
        json!({
            "id": 7,
            "cmd": "dictionary.update",
            "payload": { "id": id, "category": "conversation", "notes": "polite" }
        }),
    )
    .await;
    assert_eq!(reply["status"], "ok");
    assert_eq!(reply["payload"]["category"], "conversation");
    assert_eq!(reply["payload"]["notes"], "polite");
    assert_eq!(reply["payload"]["arabiJubaPhrase"], "shukran");

    let reply = call(
        &state,
        json!({ "id": 8, "cmd": "dictionary.delete", "payload": { "id": id } }),
    )
    .await;
    assert_eq!(reply["payload"]["message"], "Entry deleted");

    let reply = call(
        &state,
        json!({ "id": 9, "cmd": "dictionary.delete", "payload": { "id": id } }),
    )
    .await;
    assert_eq!(reply["kind"], "not_found");
}

#[tokio::test]
async fn test_update_errors() {
    let state = memory_state();
    let entry = create(&state, "water", "moya").await;

    let reply = call(
        &state,
        json!({ "id": 10, "cmd": "dictionary.update", "payload": { "englishPhrase": "x" } }),
    )
    .await;
    assert_eq!(reply["kind"], "missing_parameter");

    let reply = call(
        &state,
        json!({
            "id": 11,
            "cmd": "dictionary.update",
            "payload": { "id": entry["id"], "englishPhrase": "" }
        }),
    )
    .await;
    assert_eq!(reply["kind"], "validation_failed");
    assert_eq!(reply["field"], "englishPhrase");

    let reply = call(
        &state,
        json!({
            "id": 12,
            "cmd": "dictionary.update",
            "payload": { "id": "missing", "notes": "x" }
        }),
    )
    .await;
    assert_eq!(reply["kind"], "not_found");
}

#[tokio::test]
async fn test_malformed_requests() {
    let state = memory_state();

    let reply: Value = serde_json::from_str(&handle(&state, "{ nope").await).unwrap();
    assert_eq!(reply["kind"], "invalid_request");

    let reply = call(&state, json!({ "id": 13, "cmd": "dictionary.drop" })).await;
    assert_eq!(reply["id"], 13);
    assert_eq!(reply["kind"], "unknown_command");
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let state = memory_state();
    create(&state, "one", "wahid").await;
    create(&state, "two", "itnen").await;
    create(&state, "three", "talata").await;

    let reply = call(&state, json!({ "id": 15, "cmd": "dictionary.list" })).await;
    let english: Vec<&str> = reply["payload"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["englishPhrase"].as_str().unwrap())
        .collect();
    assert_eq!(english, vec!["one", "two", "three"]);
}

/// Store that never answers in time
struct StalledStore;

#[async_trait]
impl DictionaryStore for StalledStore {
    async fn insert(&self, _entry: ValidEntry) -> Result<DictionaryEntry, StoreError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Err(StoreError::Timeout(5000))
    }

    async fn list_all(&self) -> Result<Vec<DictionaryEntry>, StoreError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(vec![])
    }

    async fn find_one_where(
        &self,
        _side: Direction,
        _value: &str,
    ) -> Result<Option<DictionaryEntry>, StoreError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(None)
    }

    async fn update_by_id(
        &self,
        id: &str,
        _patch: ValidPatch,
    ) -> Result<DictionaryEntry, StoreError> {
        Err(StoreError::NotFound(id.to_string()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        Err(StoreError::NotFound(id.to_string()))
    }
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let mut config = Config::default();
    config.request_timeout_ms = 50;
    let state = AppState::with_store(config, Arc::new(StalledStore));

    let reply = call(
        &state,
        json!({
            "id": 14,
            "cmd": "dictionary.translate",
            "payload": { "phrase": "hello", "source": "english" }
        }),
    )
    .await;
    assert_eq!(reply["kind"], "store_unavailable");
}
