use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;

use zaploja::bot::BotDeps;
use zaploja::catalog::{Catalog, RepairPriceList};
use zaploja::core::{config, init_logger};
use zaploja::storage::StateStore;
use zaploja::sweeper;
use zaploja::whatsapp::webhook::{start_web_server, AppState};
use zaploja::whatsapp::{MessageSender, UltramsgSender};

/// Main entry point for the WhatsApp bot
///
/// Wires the UltraMsg sender, the state store and the catalog into the
/// dispatcher, starts the idle sweeper and serves the webhook.
///
/// # Errors
/// Returns an error if initialization fails (logging, sender, server bind).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    // Catch panics from spawned tasks so the service logs instead of dying silently
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    if config::ULTRAMSG_INSTANCE_ID.is_empty() || config::ULTRAMSG_TOKEN.is_empty() {
        log::warn!("ULTRAMSG_INSTANCE_ID / ULTRAMSG_TOKEN not set — outbound sends will fail");
    }

    let sender: Arc<dyn MessageSender> = Arc::new(UltramsgSender::from_config()?);
    let store = Arc::new(StateStore::new(&*config::STATE_FILE_PATH));

    let deps = Arc::new(BotDeps {
        sender: Arc::clone(&sender),
        catalog: Catalog::new(&*config::CATALOG_PATH),
        repair_prices: RepairPriceList::new(&*config::REPAIR_PRICES_PATH),
        receipts_dir: (*config::RECEIPTS_DIR).clone().into(),
    });

    let _sweeper = sweeper::start_sweeper(Arc::clone(&store), Arc::clone(&sender));

    let state = AppState {
        deps,
        store,
        bot_enabled: Arc::new(AtomicBool::new(*config::BOT_ENABLED)),
    };

    log::info!("Zaploja starting (bot enabled: {})", *config::BOT_ENABLED);

    start_web_server(*config::WEB_PORT, state)
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))
}
