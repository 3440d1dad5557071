//! Last-resort adapter for service ids outside the catalog. Requests
//! degrade to a single message field; replies to best-effort text probing.

use serde_json::{json, Value};

use super::base::{NormalizedReply, OutgoingTurn, ServiceAdapter};
use super::wire::probe_text;

pub struct FallbackAdapter;

impl ServiceAdapter for FallbackAdapter {
    fn format_request(&self, turn: &OutgoingTurn) -> Value {
        json!({"message": turn.input})
    }

    fn normalize_response(&self, raw: &Value) -> NormalizedReply {
        NormalizedReply::text(probe_text(raw))
    }
}
