//! Zaploja — WhatsApp retail bot for a phone store.
//!
//! Scripted conversation flows (purchase with card/PIX/trade-in pricing,
//! technical assistance, used-device buyback, agent handoff) driven by a
//! per-chat state machine, with a JSON state store, an idle sweeper and
//! HTML receipts delivered over the UltraMsg API.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `bot`: conversation record, dispatcher and handlers
//! - `catalog`: product catalog and repair price list
//! - `pricing`: final-price calculation
//! - `receipt`: purchase receipt rendering
//! - `storage`: JSON state store
//! - `sweeper`: idle-conversation sweeper
//! - `whatsapp`: UltraMsg sender, webhook server, id normalization

pub mod bot;
pub mod catalog;
pub mod core;
pub mod pricing;
pub mod receipt;
pub mod storage;
pub mod sweeper;
pub mod whatsapp;

// Re-export commonly used types for convenience
pub use bot::{dispatch, process_incoming, BotDeps, ConversationState, StateTag};
pub use core::{config, AppError, AppResult};
pub use storage::{StateMap, StateStore};
pub use whatsapp::{normalize_chat_id, MessageSender, UltramsgSender};
