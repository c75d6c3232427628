//! Conversation dispatcher and per-trail handlers.
//!
//! One inbound message selects exactly one handler by the record's state
//! tag. Handlers send their replies through the `MessageSender` seam,
//! mutate the record in place and advance the tag; the caller persists the
//! record afterwards — including after a handler error, so whatever was
//! mutated before the failure is kept (long-standing store behavior, kept
//! on purpose).

pub mod checkout;
pub mod menu;
pub mod payment;
pub mod purchase;
pub mod repair;
pub mod sell;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::bot::messages;
use crate::bot::state::{ConversationState, StateTag};
use crate::catalog::{Catalog, RepairPriceList};
use crate::core::error::AppResult;
use crate::storage::StateStore;
use crate::whatsapp::{normalize_chat_id, MessageSender};

/// Handler dependencies, shared by the webhook path and the tests.
pub struct BotDeps {
    pub sender: Arc<dyn MessageSender>,
    pub catalog: Catalog,
    pub repair_prices: RepairPriceList,
    pub receipts_dir: PathBuf,
}

/// Per-turn context handed to every handler.
pub struct HandlerCtx<'a> {
    pub deps: &'a BotDeps,
    pub chat_id: &'a str,
    pub now: DateTime<Utc>,
}

impl HandlerCtx<'_> {
    /// Best-effort text delivery: failures are logged, never retried.
    pub async fn send(&self, body: &str) {
        if let Err(e) = self.deps.sender.send_text(self.chat_id, body).await {
            log::error!("Failed to send message to {}: {}", self.chat_id, e);
        }
    }

    /// Best-effort document delivery.
    pub async fn send_document(&self, file_path: &Path) {
        if let Err(e) = self.deps.sender.send_document(self.chat_id, file_path).await {
            log::error!("Failed to send document to {}: {}", self.chat_id, e);
        }
    }
}

/// One full webhook turn: normalize the id, load the store, dispatch, save.
///
/// The record is saved even when the handler fails — partial mutations
/// survive the turn, only the remaining replies are lost.
pub async fn process_incoming(deps: &BotDeps, store: &StateStore, raw_chat_id: &str, body: &str) -> AppResult<()> {
    let chat_id = normalize_chat_id(raw_chat_id);
    if chat_id.is_empty() {
        log::warn!("Dropping message with unusable chat id: '{}'", raw_chat_id);
        return Ok(());
    }

    let mut states = store.load_all()?;
    let mut record = states.remove(&chat_id);

    let result = dispatch(deps, &chat_id, &mut record, body, Utc::now()).await;

    if let Some(record) = record {
        states.insert(chat_id, record);
    }
    store.save_all(&states)?;

    result
}

/// Route one message to the handler for the record's current state.
///
/// * empty message → generic "didn't understand", no state change
/// * absent record → greeting handler seeds it
/// * `agent_mode` → no-op, a human owns the conversation
/// * terminal tag → greeting flow restarts
/// * unrecognized tag → conversation reset to the greeting
pub async fn dispatch(
    deps: &BotDeps,
    chat_id: &str,
    record: &mut Option<ConversationState>,
    raw_message: &str,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let ctx = HandlerCtx { deps, chat_id, now };
    let message = raw_message.trim();

    if message.is_empty() {
        ctx.send(messages::DID_NOT_UNDERSTAND).await;
        return Ok(());
    }

    let convo = match record {
        Some(convo) => convo,
        None => {
            let seeded = menu::greet_and_ask_options(&ctx).await;
            *record = Some(seeded);
            return Ok(());
        }
    };

    if convo.agent_mode {
        log::info!("Chat {} is in agent mode, skipping dispatch", chat_id);
        return Ok(());
    }

    match convo.state {
        StateTag::AskedOption => menu::handle_option(&ctx, convo, message).await,

        // Buy trail
        StateTag::AskedModelName => purchase::handle_model_search(&ctx, convo, message).await,
        StateTag::AskedModelNumber => purchase::handle_model_number_choice(&ctx, convo, message).await,
        StateTag::ConfirmPurchase => purchase::handle_confirm_purchase(&ctx, convo, message).await,
        StateTag::AskedPaymentMethod => payment::handle_payment_method(&ctx, convo, message).await,
        StateTag::AskedCreditInstallments => payment::handle_credit_installments(&ctx, convo, message).await,

        // Trade-in chain
        StateTag::AskedUsedPhoneModel => payment::handle_used_phone_model(&ctx, convo, message).await,
        StateTag::AskedUsedPhoneStorage => payment::handle_used_phone_storage(&ctx, convo, message).await,
        StateTag::AskedUsedPhoneBattery => payment::handle_used_phone_battery(&ctx, convo, message).await,
        StateTag::AskedUsedPhoneFaceId => payment::handle_used_phone_face_id(&ctx, convo, message).await,
        StateTag::AskedUsedPhoneDefects => payment::handle_used_phone_defects(&ctx, convo, message).await,
        StateTag::AskedComplementPaymentMethod => payment::handle_complement_payment_method(&ctx, convo, message).await,

        // Checkout
        StateTag::AskedName
        | StateTag::AskedCpf
        | StateTag::AskedPhone
        | StateTag::AskedAddress
        | StateTag::AskedNeighborhood
        | StateTag::AskedZip
        | StateTag::AskedEmail => checkout::collect_client_data(&ctx, convo, message).await,

        // Repair trail
        StateTag::AskedTechOption => repair::handle_tech_option_choice(&ctx, convo, message).await,
        StateTag::AskedPhoneModel => repair::handle_phone_model(&ctx, convo, message).await,
        StateTag::AskedServiceConfirmation => repair::handle_service_confirmation(&ctx, convo, message).await,
        StateTag::AskedProblemDescription => repair::handle_problem_description(&ctx, convo, message).await,

        // Sell trail
        StateTag::AskedUsedPhoneModelSell => sell::handle_model(&ctx, convo, message).await,
        StateTag::AskedUsedPhoneStorageSell => sell::handle_storage(&ctx, convo, message).await,
        StateTag::AskedUsedPhoneBatterySell => sell::handle_battery(&ctx, convo, message).await,
        StateTag::AskedUsedPhoneFaceIdSell => sell::handle_face_id(&ctx, convo, message).await,
        StateTag::AskedUsedPhoneDefectsSell => sell::handle_defects(&ctx, convo, message).await,
        StateTag::AskedUsedPhonePhotosSell => sell::handle_photos(&ctx, convo, message).await,

        // Agent handoff: absorbing, only a courtesy reply
        StateTag::WaitingForAgent => {
            ctx.send(messages::AGENT_WAIT).await;
            Ok(())
        }

        // A message in a terminal state restarts the flow
        StateTag::Finished | StateTag::SessionEnded => menu::handle_terminal_reentry(&ctx, convo).await,

        // Tag from an older revision of the flow: reset
        StateTag::Unknown => menu::handle_unknown_state(&ctx, convo).await,
    }
}
