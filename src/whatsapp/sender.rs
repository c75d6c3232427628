//! Outbound message delivery over the UltraMsg HTTP API.
//!
//! The `MessageSender` trait is the seam between the conversation core and
//! the transport: the bot and the sweeper only ever see the trait. Delivery
//! is best-effort — callers log failures and move on, nothing retries.

use std::path::Path;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Delivery interface consumed by the conversation core.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Deliver a plain text message to a chat.
    async fn send_text(&self, chat_id: &str, body: &str) -> AppResult<()>;

    /// Deliver a file attachment to a chat.
    async fn send_document(&self, chat_id: &str, file_path: &Path) -> AppResult<()>;
}

/// Production sender backed by the UltraMsg REST API.
pub struct UltramsgSender {
    http: reqwest::Client,
    base_url: String,
    instance_id: String,
    token: String,
}

impl UltramsgSender {
    pub fn new(base_url: &str, instance_id: &str, token: &str) -> AppResult<Self> {
        let http = reqwest::Client::builder().timeout(config::network::timeout()).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            instance_id: instance_id.to_string(),
            token: token.to_string(),
        })
    }

    /// Sender configured from the environment.
    pub fn from_config() -> AppResult<Self> {
        Self::new(
            &config::ULTRAMSG_API_URL,
            &config::ULTRAMSG_INSTANCE_ID,
            &config::ULTRAMSG_TOKEN,
        )
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}/messages/{}", self.base_url, self.instance_id, resource)
    }
}

#[async_trait]
impl MessageSender for UltramsgSender {
    async fn send_text(&self, chat_id: &str, body: &str) -> AppResult<()> {
        let response = self
            .http
            .post(self.endpoint("chat"))
            .form(&[("to", chat_id), ("body", body), ("token", self.token.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus(status));
        }
        log::info!("Sent message to {}: '{}'", chat_id, body);
        Ok(())
    }

    async fn send_document(&self, chat_id: &str, file_path: &Path) -> AppResult<()> {
        let bytes = fs_err::read(file_path)?;
        let filename = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "documento".to_string());

        let encoded = BASE64.encode(&bytes);
        let response = self
            .http
            .post(self.endpoint("document"))
            .form(&[
                ("to", chat_id),
                ("filename", filename.as_str()),
                ("document", encoded.as_str()),
                ("token", self.token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus(status));
        }
        log::info!("Sent document {} to {}", filename, chat_id);
        Ok(())
    }
}
