//! Recording mock for the `MessageSender` seam.
//!
//! Captures every outbound text/document so tests can assert on what the
//! customer would have received; can be flipped into a failing mode to
//! exercise the fire-and-forget error paths.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use zaploja::core::error::{AppError, AppResult};
use zaploja::whatsapp::MessageSender;

#[derive(Default)]
pub struct MockSender {
    texts: Mutex<Vec<(String, String)>>,
    documents: Mutex<Vec<(String, PathBuf)>>,
    fail_all: AtomicBool,
}

impl MockSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail.
    pub fn fail_all(&self) {
        self.fail_all.store(true, Ordering::Relaxed);
    }

    /// All `(chat_id, body)` texts sent so far.
    pub async fn texts(&self) -> Vec<(String, String)> {
        self.texts.lock().await.clone()
    }

    /// Bodies of texts sent to `chat_id`.
    pub async fn bodies_for(&self, chat_id: &str) -> Vec<String> {
        self.texts
            .lock()
            .await
            .iter()
            .filter(|(to, _)| to == chat_id)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub async fn documents(&self) -> Vec<(String, PathBuf)> {
        self.documents.lock().await.clone()
    }

    pub async fn text_count(&self) -> usize {
        self.texts.lock().await.len()
    }
}

#[async_trait]
impl MessageSender for MockSender {
    async fn send_text(&self, chat_id: &str, body: &str) -> AppResult<()> {
        if self.fail_all.load(Ordering::Relaxed) {
            return Err(AppError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY));
        }
        self.texts.lock().await.push((chat_id.to_string(), body.to_string()));
        Ok(())
    }

    async fn send_document(&self, chat_id: &str, file_path: &Path) -> AppResult<()> {
        if self.fail_all.load(Ordering::Relaxed) {
            return Err(AppError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY));
        }
        self.documents
            .lock()
            .await
            .push((chat_id.to_string(), file_path.to_path_buf()));
        Ok(())
    }
}
