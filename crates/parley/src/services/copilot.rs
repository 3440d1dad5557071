//! The simple assistant family: conversational request without a room id,
//! reply is a single `response` field.

use serde_json::{json, Value};

use super::base::{NormalizedReply, OutgoingTurn, ServiceAdapter};
use super::wire::{messages_with_input, probe_text};

pub struct CopilotAdapter;

impl ServiceAdapter for CopilotAdapter {
    fn format_request(&self, turn: &OutgoingTurn) -> Value {
        json!({
            "messages": messages_with_input(turn.history, turn.input),
        })
    }

    fn normalize_response(&self, raw: &Value) -> NormalizedReply {
        let text = raw
            .get("response")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| probe_text(raw));

        NormalizedReply::text(text)
    }
}
