//! Conversation state persistence.

pub mod store;

pub use store::{StateMap, StateStore};
