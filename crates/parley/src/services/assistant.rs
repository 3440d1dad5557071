//! The conversational, vision-capable family: the main assistant and the
//! domain specialist share this schema.

use serde_json::{json, Value};

use super::base::{defaults, NormalizedReply, OutgoingTurn, ServiceAdapter};
use super::wire::{image_part, messages_with_input, ROOM_ID};

pub struct AssistantAdapter;

impl AssistantAdapter {
    /// With attachments present every message switches to typed content
    /// parts: image parts first, then the text part, flattened across the
    /// full history plus the new turn.
    fn vision_messages(turn: &OutgoingTurn) -> Vec<Value> {
        let mut messages: Vec<Value> = turn
            .history
            .iter()
            .map(|utterance| {
                json!({
                    "role": utterance.role,
                    "content": [{"type": "text", "text": utterance.content}],
                })
            })
            .collect();

        let mut parts: Vec<Value> = turn.attachments.iter().map(image_part).collect();
        parts.push(json!({"type": "text", "text": turn.input}));
        messages.push(json!({"role": "user", "content": parts}));

        messages
    }
}

impl ServiceAdapter for AssistantAdapter {
    fn format_request(&self, turn: &OutgoingTurn) -> Value {
        let messages = if turn.attachments.is_empty() {
            messages_with_input(turn.history, turn.input)
        } else {
            Self::vision_messages(turn)
        };

        json!({
            "messages": messages,
            "room_id": ROOM_ID,
        })
    }

    fn normalize_response(&self, raw: &Value) -> NormalizedReply {
        if let Some(text) = raw.as_str() {
            return NormalizedReply::text(text);
        }

        let text = raw
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .unwrap_or(defaults::NO_RESPONSE);

        let images = raw
            .get("image")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        NormalizedReply {
            text: text.to_string(),
            images,
            ..NormalizedReply::default()
        }
    }
}
