//! Background sweeper that warns, closes and expires idle conversations.
//!
//! Runs as a `tokio::spawn`ed task on a fixed interval, fully independent
//! of the webhook path: each cycle loads the whole store, applies the
//! warn/close/retention policy and rewrites the store. Conversations under
//! human takeover (`agent_mode`) are left alone.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::bot::messages;
use crate::bot::state::StateTag;
use crate::core::config;
use crate::core::error::AppResult;
use crate::storage::StateStore;
use crate::whatsapp::MessageSender;

/// Start the sweeper background task.
pub fn start_sweeper(store: Arc<StateStore>, sender: Arc<dyn MessageSender>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(config::sweeper::check_interval());

        log::info!(
            "Idle sweeper started (interval: {}s, warn: {}s, close: {}s, retention: {}s)",
            config::sweeper::CHECK_INTERVAL_SECS,
            config::sweeper::WARN_AFTER_SECS,
            config::sweeper::CLOSE_AFTER_SECS,
            config::sweeper::RETENTION_SECS,
        );

        loop {
            ticker.tick().await;

            if let Err(e) = run_sweep(&store, sender.as_ref(), Utc::now()).await {
                log::error!("Idle sweep cycle failed: {}", e);
            }
        }
    })
}

/// One sweep cycle over the full store.
///
/// * past the warn threshold and not yet warned: send a warning, mark it
/// * past the close threshold: send the closure notice, move to
///   `SESSION_ENDED` and stamp the pause time
/// * terminal for longer than the retention window: delete the record
pub async fn run_sweep(store: &StateStore, sender: &dyn MessageSender, now: DateTime<Utc>) -> AppResult<()> {
    let mut states = store.load_all()?;
    let mut expired: Vec<String> = Vec::new();

    for (chat_id, record) in states.iter_mut() {
        if record.agent_mode {
            continue;
        }

        if record.state.is_terminal() {
            if let Some(paused) = record.pause_start_time {
                if (now - paused).num_seconds() > config::sweeper::RETENTION_SECS {
                    expired.push(chat_id.clone());
                }
            }
            continue;
        }

        let idle_secs = (now - record.last_interaction).num_seconds();

        if idle_secs > config::sweeper::CLOSE_AFTER_SECS {
            if let Err(e) = sender.send_text(chat_id, messages::SESSION_CLOSED).await {
                log::error!("Failed to send closure notice to {}: {}", chat_id, e);
            }
            record.state = StateTag::SessionEnded;
            record.pause_start_time = Some(now);
            log::info!("Closed idle conversation {}", chat_id);
        } else if idle_secs > config::sweeper::WARN_AFTER_SECS && !record.idle_warning_sent {
            if let Err(e) = sender.send_text(chat_id, messages::IDLE_WARNING).await {
                log::error!("Failed to send idle warning to {}: {}", chat_id, e);
            }
            record.idle_warning_sent = true;
            log::info!("Warned idle conversation {}", chat_id);
        }
    }

    for chat_id in &expired {
        states.remove(chat_id);
        log::info!("Deleted expired conversation {}", chat_id);
    }

    store.save_all(&states)?;
    Ok(())
}
