//! JSON-backed conversation state store.
//!
//! The whole map is loaded at the start of a turn and rewritten after every
//! mutation. There is no locking: the webhook path and the idle sweeper each
//! do their own load/mutate/save, last write wins. Fine for the conversation
//! counts this runs at; revisit if the store ever grows past a few thousand
//! records.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::bot::state::ConversationState;
use crate::core::error::AppResult;

/// Conversation-id (canonical phone digits) to record.
pub type StateMap = HashMap<String, ConversationState>;

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full map. A missing file is a fresh install; a corrupt file
    /// is logged and replaced by an empty map on the next save.
    pub fn load_all(&self) -> AppResult<StateMap> {
        if !self.path.exists() {
            log::info!("State file {} not found, starting empty", self.path.display());
            return Ok(StateMap::new());
        }

        let raw = fs_err::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                log::error!("State file {} is corrupt ({}), resetting", self.path.display(), e);
                Ok(StateMap::new())
            }
        }
    }

    /// Rewrite the full map.
    pub fn save_all(&self, states: &StateMap) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(states)?;
        fs_err::write(&self.path, raw)?;
        Ok(())
    }
}
