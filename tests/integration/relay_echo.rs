use agentos::relay::{MessageSender, OutboundReply, UnconfiguredSender};
use agentos::EventType;
use anyhow::Result;
use serde_json::json;
use std::cell::RefCell;

use crate::support::card_fixture::CardFixture;

#[derive(Default)]
struct CapturingSender {
    sent: RefCell<Vec<OutboundReply>>,
}

impl MessageSender for CapturingSender {
    fn send_message(&self, reply: &OutboundReply) -> Result<()> {
        self.sent.borrow_mut().push(reply.clone());
        Ok(())
    }
}

#[test]
fn relay_echoes_and_records_forward() -> Result<()> {
    let fixture = CardFixture::new();
    let sender = CapturingSender::default();
    let outcome = fixture
        .workspace
        .relay(&sender, r#"{"message":{"chat":{"id":99},"text":"ping"}}"#);
    assert!(outcome.delivered);
    assert_eq!(outcome.ack.status_code, 200);
    assert_eq!(outcome.ack.body, json!({ "ok": true }));
    assert_eq!(sender.sent.borrow()[0].text, "You said: ping 👋");

    let events = fixture.workspace.events().load()?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::RelayForwarded);
    assert_eq!(events[0].details["chat_id"], 99);
    Ok(())
}

#[test]
fn relay_without_chat_or_token_still_acks() -> Result<()> {
    let fixture = CardFixture::new();
    let silent = fixture.workspace.relay(&UnconfiguredSender, "{}");
    assert!(silent.reply.is_none());
    assert_eq!(silent.ack.body, json!({ "ok": true }));
    assert!(fixture.workspace.events().load()?.is_empty());

    let failed = fixture
        .workspace
        .relay(&UnconfiguredSender, r#"{"message":{"chat":{"id":5},"text":"x"}}"#);
    assert!(!failed.delivered);
    assert_eq!(failed.ack.status_code, 200);
    Ok(())
}
