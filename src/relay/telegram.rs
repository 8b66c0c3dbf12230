//! Telegram Bot API sender (`sendMessage`).

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::workspace::RelaySettings;

use super::{MessageSender, OutboundReply};

pub struct TelegramSender {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl TelegramSender {
    pub fn new(api_base: &str, bot_token: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: format!(
                "{}/bot{}/sendMessage",
                api_base.trim_end_matches('/'),
                bot_token
            ),
        }
    }

    /// Reads the token from the configured environment variable.
    pub fn from_settings(settings: &RelaySettings) -> Result<Self> {
        let token = settings.bot_token().with_context(|| {
            format!(
                "Relay bot token missing; set {} in the environment",
                settings.bot_token_env
            )
        })?;
        Ok(Self::new(&settings.api_base, &token))
    }
}

impl MessageSender for TelegramSender {
    fn send_message(&self, reply: &OutboundReply) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "chat_id": reply.chat_id,
                "text": reply.text,
            }))
            .send()
            .context("Failed reaching the Telegram API")?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            bail!("Telegram returned HTTP {status}: {body}");
        }
        Ok(())
    }
}
