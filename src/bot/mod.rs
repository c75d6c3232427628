//! Conversation state machine: record, messages, dispatcher and handlers.

pub mod handlers;
pub mod messages;
pub mod state;

pub use handlers::{dispatch, process_incoming, BotDeps};
pub use state::{ConversationState, StateTag};
