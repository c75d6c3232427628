//! Webhook boundary tests against a real listener on an ephemeral port.

mod common;
mod mocks;

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use common::{CATALOG_JSON, CHAT_ID, REPAIR_JSON};
use mocks::MockSender;
use zaploja::bot::state::StateTag;
use zaploja::bot::BotDeps;
use zaploja::catalog::{Catalog, RepairPriceList};
use zaploja::storage::{StateMap, StateStore};
use zaploja::whatsapp::webhook::{router, AppState};

struct WebApp {
    base: String,
    sender: Arc<MockSender>,
    store: Arc<StateStore>,
    catalog_path: PathBuf,
    _dir: TempDir,
}

async fn spawn_app(enabled: bool) -> WebApp {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("produtos_lacrados.json");
    std::fs::write(&catalog_path, CATALOG_JSON).unwrap();
    let repair_path = dir.path().join("reparo_iphones.json");
    std::fs::write(&repair_path, REPAIR_JSON).unwrap();

    let sender = Arc::new(MockSender::new());
    let deps = Arc::new(BotDeps {
        sender: sender.clone(),
        catalog: Catalog::new(&catalog_path),
        repair_prices: RepairPriceList::new(&repair_path),
        receipts_dir: dir.path().join("receipts"),
    });
    let store = Arc::new(StateStore::new(dir.path().join("conversation_states.json")));

    let state = AppState {
        deps,
        store: store.clone(),
        bot_enabled: Arc::new(AtomicBool::new(enabled)),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router(state)).await;
    });

    WebApp {
        base: format!("http://{}", addr),
        sender,
        store,
        catalog_path,
        _dir: dir,
    }
}

fn message_event(from: &str, body: &str) -> serde_json::Value {
    json!({
        "event_type": "message_received",
        "data": {"from": from, "body": body}
    })
}

#[tokio::test]
async fn test_disabled_bot_rejects_webhook() {
    let app = spawn_app(false).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&app.base)
        .json(&message_event("5511999990000", "Olá"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(app.sender.text_count().await, 0);
}

#[tokio::test]
async fn test_status_toggle_flips_the_switch() {
    let app = spawn_app(false).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("{}/status", app.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"active": true}));

    let body: serde_json::Value = client
        .post(format!("{}/status", app.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"active": false}));
}

#[tokio::test]
async fn test_valid_message_is_dispatched_and_stored() {
    let app = spawn_app(true).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&app.base)
        .json(&message_event("whatsapp:+5511999990000", "Olá"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "sucesso");

    let states = app.store.load_all().unwrap();
    assert_eq!(states[CHAT_ID].state, StateTag::AskedOption, "key is digits only");

    let bodies = app.sender.bodies_for(CHAT_ID).await;
    assert!(bodies[0].contains("Bem-vindo"));
}

#[tokio::test]
async fn test_malformed_events_are_rejected_at_the_boundary() {
    let app = spawn_app(true).await;
    let client = reqwest::Client::new();

    for payload in [
        json!({"event_type": "message_sent", "data": {"from": "55119", "body": "x"}}),
        json!({"event_type": "message_received"}),
        json!({"event_type": "message_received", "data": {"from": "55119"}}),
        json!({"event_type": "message_received", "data": {"body": "x"}}),
    ] {
        let response = client.post(&app.base).json(&payload).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 400, "payload: {}", payload);
    }

    assert_eq!(app.sender.text_count().await, 0);
    assert!(app.store.load_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_catalog_upload_replaces_the_document() {
    let app = spawn_app(true).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/catalog", app.base))
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let new_catalog = r#"[{"produto": "iPhone 15 256GB", "preco": 7200.0, "cor": "Titânio"}]"#;
    let response = client
        .post(format!("{}/catalog", app.base))
        .body(new_catalog)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["products"], 1);

    let on_disk = std::fs::read_to_string(&app.catalog_path).unwrap();
    assert!(on_disk.contains("iPhone 15 256GB"));
}

#[tokio::test]
async fn test_conversation_listing_and_agent_toggle() {
    let app = spawn_app(true).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/conversations/5511999990000/agent", app.base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let mut states = StateMap::new();
    states.insert(CHAT_ID.to_string(), common::record_at(StateTag::AskedPaymentMethod));
    app.store.save_all(&states).unwrap();

    let rows: serde_json::Value = client
        .get(format!("{}/conversations", app.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rows["conversations"][0]["chat_id"], CHAT_ID);
    assert_eq!(rows["conversations"][0]["state"], "ASKED_PAYMENT_METHOD");
    assert_eq!(rows["conversations"][0]["agent_mode"], false);

    let body: serde_json::Value = client
        .post(format!("{}/conversations/whatsapp:+5511999990000/agent", app.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["agent_mode"], true);

    // With the agent in charge the dispatcher ignores inbound messages
    let response = client
        .post(&app.base)
        .json(&message_event(CHAT_ID, "1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.sender.text_count().await, 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = spawn_app(false).await;
    let response = reqwest::get(format!("{}/health", app.base)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}
