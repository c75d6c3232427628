//! Inbound webhook and operator control endpoints.
//!
//! Boundary-only concerns live here: event validation, the bot-enabled
//! switch, catalog replacement and per-conversation agent takeover. The
//! conversation core never sees any of it — it receives a clean
//! `(from, body)` pair or nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::bot::handlers::{process_incoming, BotDeps};
use crate::bot::state::Product;
use crate::storage::StateStore;
use crate::whatsapp::normalize_chat_id;

/// Shared state for the webhook server.
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<BotDeps>,
    pub store: Arc<StateStore>,
    pub bot_enabled: Arc<AtomicBool>,
}

/// Inbound UltraMsg webhook event. Everything is optional so validation
/// can answer 400 instead of letting axum reject the body.
#[derive(Debug, Deserialize)]
struct WebhookEvent {
    event_type: Option<String>,
    data: Option<WebhookData>,
}

#[derive(Debug, Deserialize)]
struct WebhookData {
    from: Option<String>,
    body: Option<String>,
}

/// Build the router; separated from `start_web_server` for tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(webhook_handler))
        .route("/status", post(toggle_status_handler))
        .route("/conversations", get(list_conversations_handler))
        .route("/conversations/:id/agent", post(toggle_agent_handler))
        .route("/catalog", post(upload_catalog_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Start the webhook/control server.
pub async fn start_web_server(port: u16, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(state);

    log::info!("Starting webhook server on http://{}", addr);
    log::info!("  POST /                        - UltraMsg webhook");
    log::info!("  POST /status                  - Toggle bot on/off");
    log::info!("  GET  /conversations           - List conversations");
    log::info!("  POST /conversations/:id/agent - Toggle agent takeover");
    log::info!("  POST /catalog                 - Replace product catalog");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// POST / — one inbound message event.
async fn webhook_handler(State(state): State<AppState>, Json(event): Json<WebhookEvent>) -> Response {
    if !state.bot_enabled.load(Ordering::Relaxed) {
        return (StatusCode::FORBIDDEN, Json(json!({"error": "Bot está desativado"}))).into_response();
    }

    if event.event_type.as_deref() != Some("message_received") {
        log::error!("Webhook event with missing or invalid event_type");
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Evento inválido"}))).into_response();
    }

    let Some(data) = event.data else {
        log::error!("Webhook event missing 'data'");
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Faltando data no JSON"}))).into_response();
    };

    let (from, body) = match (data.from, data.body) {
        (Some(from), Some(body)) if !from.is_empty() => (from, body),
        _ => {
            log::error!("Webhook event missing 'from' or 'body'");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Faltando sender ou body nos dados"})),
            )
                .into_response();
        }
    };

    match process_incoming(&state.deps, &state.store, &from, &body).await {
        Ok(()) => (StatusCode::OK, Json(json!({"status": "sucesso"}))).into_response(),
        Err(e) => {
            log::error!("Webhook processing failed for {}: {}", from, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Erro interno do servidor"})),
            )
                .into_response()
        }
    }
}

/// POST /status — flip the bot-enabled switch.
async fn toggle_status_handler(State(state): State<AppState>) -> Response {
    let was = state.bot_enabled.fetch_xor(true, Ordering::Relaxed);
    let active = !was;
    log::info!("Bot enabled toggled to {}", active);
    Json(json!({"active": active})).into_response()
}

/// GET /conversations — current records, one summary row each.
async fn list_conversations_handler(State(state): State<AppState>) -> Response {
    match state.store.load_all() {
        Ok(states) => {
            let rows: Vec<_> = states
                .iter()
                .map(|(chat_id, record)| {
                    json!({
                        "chat_id": chat_id,
                        "state": record.state.to_string(),
                        "last_interaction": record.last_interaction,
                        "agent_mode": record.agent_mode,
                    })
                })
                .collect();
            Json(json!({"conversations": rows})).into_response()
        }
        Err(e) => {
            log::error!("Failed to list conversations: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Erro interno do servidor"})),
            )
                .into_response()
        }
    }
}

/// POST /conversations/:id/agent — toggle human takeover for one chat.
async fn toggle_agent_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let chat_id = normalize_chat_id(&id);

    let mut states = match state.store.load_all() {
        Ok(states) => states,
        Err(e) => {
            log::error!("Failed to load store: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Erro interno do servidor"})),
            )
                .into_response();
        }
    };

    let Some(record) = states.get_mut(&chat_id) else {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Conversa não encontrada"}))).into_response();
    };

    record.agent_mode = !record.agent_mode;
    let agent_mode = record.agent_mode;

    if let Err(e) = state.store.save_all(&states) {
        log::error!("Failed to save store: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Erro interno do servidor"})),
        )
            .into_response();
    }

    log::info!("Agent mode for {} set to {}", chat_id, agent_mode);
    Json(json!({"chat_id": chat_id, "agent_mode": agent_mode})).into_response()
}

/// POST /catalog — replace the product catalog document.
async fn upload_catalog_handler(State(state): State<AppState>, body: String) -> Response {
    let products: Vec<Product> = match serde_json::from_str(&body) {
        Ok(products) => products,
        Err(e) => {
            log::error!("Rejected catalog upload: {}", e);
            return (StatusCode::BAD_REQUEST, Json(json!({"error": "Catálogo inválido"}))).into_response();
        }
    };

    if let Err(e) = fs_err::write(state.deps.catalog.path(), &body) {
        log::error!("Failed to write catalog: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Erro interno do servidor"})),
        )
            .into_response();
    }

    log::info!("Catalog replaced ({} products)", products.len());
    Json(json!({"status": "sucesso", "products": products.len()})).into_response()
}

/// GET /health — simple health check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
