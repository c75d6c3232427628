//! Shared test environment for the integration suites.
//!
//! Builds handler deps against a temp directory: a small catalog and repair
//! price list on disk, a recording mock sender and a fresh state store.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use tempfile::TempDir;

use zaploja::bot::state::{ConversationState, Product, StateTag};
use zaploja::bot::BotDeps;
use zaploja::catalog::{Catalog, RepairPriceList};
use zaploja::storage::StateStore;

use crate::mocks::MockSender;

/// Chat id used across the suites.
pub const CHAT_ID: &str = "5511999990000";

pub const CATALOG_JSON: &str = r#"[
    {"produto": "iPhone 12 128GB", "preco": 1000.0, "cor": "Preto"},
    {"produto": "iPhone 12 Pro 256GB", "preco": 4800.0, "cor": "Azul", "detalhe": "bateria 88%"},
    {"produto": "iPhone 13 128GB", "preco": 4200.0, "cor": "Branco"}
]"#;

pub const REPAIR_JSON: &str = r#"[
    {"modelo": "iPhone 11", "tela": 450.0, "bateria": 250.0},
    {"modelo": "iPhone 12", "tela": 550.0, "bateria": 300.0, "tampa": 400.0}
]"#;

pub struct TestEnv {
    pub dir: TempDir,
    pub sender: Arc<MockSender>,
    pub deps: BotDeps,
    pub store: StateStore,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();

        let catalog_path = dir.path().join("produtos_lacrados.json");
        std::fs::write(&catalog_path, CATALOG_JSON).unwrap();
        let repair_path = dir.path().join("reparo_iphones.json");
        std::fs::write(&repair_path, REPAIR_JSON).unwrap();

        let sender = Arc::new(MockSender::new());
        let deps = BotDeps {
            sender: sender.clone(),
            catalog: Catalog::new(&catalog_path),
            repair_prices: RepairPriceList::new(&repair_path),
            receipts_dir: dir.path().join("receipts"),
        };
        let store = StateStore::new(dir.path().join("conversation_states.json"));

        Self {
            dir,
            sender,
            deps,
            store,
        }
    }
}

/// First catalog product, as the flow would have captured it.
pub fn iphone_12() -> Product {
    Product {
        produto: "iPhone 12 128GB".into(),
        preco: 1000.0,
        cor: "Preto".into(),
        detalhe: None,
    }
}

/// Record parked at `state` with the iPhone 12 already chosen.
pub fn record_at(state: StateTag) -> ConversationState {
    let mut record = ConversationState::new(Utc::now());
    record.state = state;
    record.products = vec![iphone_12()];
    record.chosen_product = Some(iphone_12());
    record
}
