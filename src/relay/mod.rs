//! Inbound chat relay: echoes an incoming bot message back to its chat.
//!
//! Stateless and unrelated to the interview. The acknowledgment is the same
//! whether or not the reply could be sent.

mod telegram;

pub use telegram::TelegramSender;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundUpdate {
    #[serde(default)]
    pub message: Option<InboundMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub chat: Option<InboundChat>,
    #[serde(default)]
    pub text: Option<Value>,
}

/// `id` stays raw JSON so numeric and string chat ids both pass through.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundChat {
    #[serde(default)]
    pub id: Option<Value>,
}

impl InboundUpdate {
    /// The chat id, unless absent or `null`.
    pub fn chat_id(&self) -> Option<&Value> {
        self.message
            .as_ref()?
            .chat
            .as_ref()?
            .id
            .as_ref()
            .filter(|id| !id.is_null())
    }

    /// Message text; non-string values are rendered as JSON.
    pub fn text(&self) -> String {
        match self.message.as_ref().and_then(|message| message.text.as_ref()) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundReply {
    pub chat_id: Value,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayAck {
    pub status_code: u16,
    pub body: Value,
}

impl RelayAck {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: json!({ "ok": true }),
        }
    }
}

/// Delivers one reply through the messaging provider.
pub trait MessageSender {
    fn send_message(&self, reply: &OutboundReply) -> Result<()>;
}

/// Sender used when no bot token is configured; every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSender;

impl MessageSender for UnconfiguredSender {
    fn send_message(&self, _reply: &OutboundReply) -> Result<()> {
        bail!("relay bot token is not configured")
    }
}

pub fn echo_text(text: &str) -> String {
    format!("You said: {text} 👋")
}

/// Reply for an update, or `None` when it carries no chat id.
pub fn reply_for(update: &InboundUpdate) -> Option<OutboundReply> {
    update.chat_id().map(|chat_id| OutboundReply {
        chat_id: chat_id.clone(),
        text: echo_text(&update.text()),
    })
}

/// Outcome of handling one webhook body.
#[derive(Debug, Clone)]
pub struct RelayOutcome {
    pub ack: RelayAck,
    pub reply: Option<OutboundReply>,
    pub delivered: bool,
}

/// Parses a raw webhook body, relays the echo if possible, and acknowledges.
///
/// An empty or unparseable body is treated as an update without a message.
pub fn handle_webhook<S: MessageSender + ?Sized>(sender: &S, raw_body: &str) -> RelayOutcome {
    let update = if raw_body.trim().is_empty() {
        InboundUpdate::default()
    } else {
        serde_json::from_str(raw_body).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring malformed relay payload");
            InboundUpdate::default()
        })
    };
    let reply = reply_for(&update);
    let delivered = match &reply {
        Some(reply) => match sender.send_message(reply) {
            Ok(()) => {
                debug!(chat_id = %reply.chat_id, "relay reply sent");
                true
            }
            Err(err) => {
                warn!(chat_id = %reply.chat_id, error = %err, "relay reply failed");
                false
            }
        },
        None => false,
    };
    RelayOutcome {
        ack: RelayAck::ok(),
        reply,
        delivered,
    }
}
