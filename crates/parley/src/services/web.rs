//! The web-intelligence family: conversational request, reply enriched with
//! follow-up suggestions and related links.

use serde_json::{json, Value};

use super::base::{defaults, NormalizedReply, OutgoingTurn, ServiceAdapter};
use super::wire::{messages_with_input, ROOM_ID};
use crate::models::link::LinkInfo;

pub struct WebIntelligenceAdapter;

impl ServiceAdapter for WebIntelligenceAdapter {
    fn format_request(&self, turn: &OutgoingTurn) -> Value {
        json!({
            "messages": messages_with_input(turn.history, turn.input),
            "room_id": ROOM_ID,
        })
    }

    fn normalize_response(&self, raw: &Value) -> NormalizedReply {
        let text = raw
            .get("response")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .unwrap_or(defaults::NO_RESPONSE);

        let suggested_prompts = raw
            .get("suggested_follow_ups")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        // Malformed link entries are skipped rather than failing the turn.
        let related_links = raw
            .get("related_links")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value::<LinkInfo>(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        NormalizedReply {
            text: text.to_string(),
            images: Vec::new(),
            suggested_prompts,
            related_links,
        }
    }
}
