// src/notify/telegram.rs
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;

use super::NotifyChannel;

const API_BASE_URL: &str = "https://api.telegram.org";

/// Telegram Bot API channel. Without a bot token it stays disabled and
/// accepts sends as no-ops, so a partially configured deployment still
/// completes its cycles.
pub struct TelegramChannel {
    bot_token: Option<String>,
    api_base: String,
    client: Client,
    timeout: Duration,
    max_retries: u8,
}

impl TelegramChannel {
    pub fn from_env() -> Self {
        let token = std::env::var("TRIPALERT_TELEGRAM_BOT_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self::build(token, API_BASE_URL)
    }

    pub fn new(bot_token: String) -> Self {
        Self::build(Some(bot_token), API_BASE_URL)
    }

    /// Point at a different API host, for tests.
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    fn build(bot_token: Option<String>, api_base: &str) -> Self {
        Self {
            bot_token,
            api_base: api_base.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }
}

#[derive(Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

#[async_trait::async_trait]
impl NotifyChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<()> {
        let Some(token) = &self.bot_token else {
            tracing::debug!("Telegram disabled (no TRIPALERT_TELEGRAM_BOT_TOKEN)");
            return Ok(());
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let payload = SendMessagePayload {
            chat_id: recipient,
            text: message,
            disable_web_page_preview: true,
        };

        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = self
                .client
                .post(&url)
                .timeout(self.timeout)
                .json(&payload)
                .send()
                .await;

            match res {
                Ok(rsp) => {
                    if let Err(e) = rsp.error_for_status_ref() {
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1)))
                                .await;
                            continue;
                        }
                        return Err(anyhow!("Telegram API HTTP error: {e}"));
                    }
                    return Ok(());
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
                        continue;
                    }
                    return Err(anyhow!("Telegram API request failed: {e}"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_channel_accepts_sends() {
        let channel = TelegramChannel::build(None, API_BASE_URL);
        assert!(channel.send("12345", "hello").await.is_ok());
    }
}
