//! Shared wire-format helpers used by more than one adapter.

use serde_json::{json, Value};

use crate::intake::{AttachmentOrigin, ImageAttachment};
use crate::models::message::Utterance;

/// Fixed room identifier the conversational endpoints expect.
pub(crate) const ROOM_ID: &str = "123456";

/// Convert history plus the new input into the common messages array.
pub fn messages_with_input(history: &[Utterance], input: &str) -> Vec<Value> {
    let mut messages: Vec<Value> = history
        .iter()
        .map(|utterance| json!({"role": utterance.role, "content": utterance.content}))
        .collect();
    messages.push(json!({"role": "user", "content": input}));
    messages
}

/// Convert one attachment into a typed image part. Remote attachments are
/// referenced by URL; local ones carry their base64 payload inline.
pub fn image_part(attachment: &ImageAttachment) -> Value {
    match attachment.origin {
        AttachmentOrigin::RemoteUrl => json!({
            "type": "image",
            "source": {
                "type": "url",
                "url": attachment.data,
            }
        }),
        AttachmentOrigin::LocalFile => json!({
            "type": "image",
            "source": {
                "type": "base64",
                "media_type": attachment.media_type,
                "data": attachment.data,
            }
        }),
    }
}

/// Render a price value with thousands separators, as the ads summary
/// displays it. Non-numeric values yield None.
pub fn format_price(value: &Value) -> Option<String> {
    if let Some(whole) = value.as_i64() {
        return Some(group_thousands(whole));
    }
    let number = value.as_f64()?;
    let whole = number.trunc() as i64;
    let fraction = (number.fract().abs() * 100.0).round() as u32;
    if fraction == 0 {
        Some(group_thousands(whole))
    } else {
        Some(format!("{}.{:02}", group_thousands(whole), fraction))
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Best-effort text extraction for payloads with no known shape: a bare
/// string verbatim, then a `text` field, then a `response` field, then the
/// pretty-printed payload.
pub fn probe_text(raw: &Value) -> String {
    if let Some(text) = raw.as_str() {
        return text.to_string();
    }
    if let Some(text) = raw.get("text").and_then(Value::as_str) {
        return text.to_string();
    }
    if let Some(text) = raw.get("response").and_then(Value::as_str) {
        return text.to_string();
    }
    serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string())
}
