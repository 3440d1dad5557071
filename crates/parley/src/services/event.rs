//! The event-wrapped family (summarization): stateless per call, the input
//! travels inside a Slack-style app_mention event.

use serde_json::{json, Value};

use super::base::{defaults, NormalizedReply, OutgoingTurn, ServiceAdapter};

const EVENT_USER: &str = "test_user";
const EVENT_CHANNEL: &str = "test_channel";

pub struct EventAdapter;

impl ServiceAdapter for EventAdapter {
    fn format_request(&self, turn: &OutgoingTurn) -> Value {
        // No history: each call stands alone.
        json!({
            "event": {
                "type": "app_mention",
                "text": turn.input,
                "user": EVENT_USER,
                "channel": EVENT_CHANNEL,
                "ts": turn.sent_at.to_string(),
            }
        })
    }

    fn normalize_response(&self, raw: &Value) -> NormalizedReply {
        let text = raw
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(defaults::PROCESSING_DONE);

        NormalizedReply::text(text)
    }
}
