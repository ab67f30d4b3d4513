// src/notify/whatsapp.rs
// WhatsApp delivery is not wired up yet. This channel queues messages
// in-memory and logs them so the rest of the pipeline behaves as if the
// channel existed.

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::NotifyChannel;

#[derive(Debug, Clone)]
pub struct PendingMessage {
    pub recipient: String,
    pub message: String,
    pub queued_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct DeferredWhatsAppChannel {
    pending: std::sync::Mutex<Vec<PendingMessage>>,
}

impl DeferredWhatsAppChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Vec<PendingMessage> {
        self.pending.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotifyChannel for DeferredWhatsAppChannel {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<()> {
        self.pending.lock().unwrap().push(PendingMessage {
            recipient: recipient.to_string(),
            message: message.to_string(),
            queued_at: Utc::now(),
        });
        tracing::info!(recipient, "WhatsApp suspended, message queued for later delivery");
        Ok(())
    }
}
