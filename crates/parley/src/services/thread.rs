//! The thread-based family (contextual ads): the request carries a named
//! conversation thread, the reply is an array of product items that gets
//! summarized into display text.

use serde_json::{json, Value};

use super::base::{defaults, NormalizedReply, OutgoingTurn, ServiceAdapter};
use super::wire::{format_price, messages_with_input};

pub struct ThreadAdapter;

impl ServiceAdapter for ThreadAdapter {
    fn format_request(&self, turn: &OutgoingTurn) -> Value {
        let thread_name = match turn.thread_name {
            Some(name) => name.to_string(),
            None => format!("chat_{}", turn.sent_at),
        };

        // The custom input mode supplies a pre-parsed conversation and no
        // new input; a regular send appends the input as the final turn.
        let conversation = if turn.input.is_empty() {
            turn.history
                .iter()
                .map(|utterance| json!({"role": utterance.role, "content": utterance.content}))
                .collect::<Vec<_>>()
        } else {
            messages_with_input(turn.history, turn.input)
        };

        json!({
            "thread_name": thread_name,
            "conversation": conversation,
        })
    }

    fn normalize_response(&self, raw: &Value) -> NormalizedReply {
        let empty = Vec::new();
        let ads = raw.as_array().unwrap_or(&empty);

        if ads.is_empty() {
            return NormalizedReply::text(defaults::NO_ADS);
        }

        let listing = ads
            .iter()
            .enumerate()
            .map(|(index, ad)| {
                let name = ad
                    .get("product_name")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let price = ad
                    .get("product_cash_price")
                    .and_then(format_price)
                    .unwrap_or_else(|| defaults::MISSING_PRICE.to_string());
                let url = ad
                    .get("product_url")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                format!("{}. {}\n   💰 ฿{}\n   🔗 {}\n", index + 1, name, price, url)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let text = format!("🎯 Found {} contextual ads:\n\n{}", ads.len(), listing);

        let images: Vec<String> = ads
            .iter()
            .filter_map(|ad| ad.get("product_image_url").and_then(Value::as_str))
            .map(String::from)
            .collect();

        NormalizedReply {
            text,
            images,
            ..NormalizedReply::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Utterance;

    #[test]
    fn test_request_derives_thread_name_from_timestamp() {
        let history = vec![Utterance::user("I need a checkup")];
        let turn = OutgoingTurn::text_only(&history, "budget 5000", 1_700_000_000);

        let body = ThreadAdapter.format_request(&turn);
        assert_eq!(body["thread_name"], "chat_1700000000");
        assert_eq!(body["conversation"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_request_with_explicit_thread_name() {
        let conversation = vec![
            Utterance::user("I need a checkup"),
            Utterance::assistant("What kind?"),
        ];
        let turn = OutgoingTurn {
            history: &conversation,
            input: "",
            attachments: &[],
            thread_name: Some("health_checkup_2024"),
            sent_at: 1_700_000_000,
        };

        let body = ThreadAdapter.format_request(&turn);
        assert_eq!(body["thread_name"], "health_checkup_2024");
        // No trailing empty user turn in the custom mode.
        assert_eq!(body["conversation"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_normalize_empty_array() {
        let reply = ThreadAdapter.normalize_response(&json!([]));
        assert_eq!(reply.text, "🎯 No contextual ads found");
        assert!(reply.images.is_empty());
    }

    #[test]
    fn test_normalize_non_array_treated_as_empty() {
        let reply = ThreadAdapter.normalize_response(&json!({"error": "oops"}));
        assert_eq!(reply.text, defaults::NO_ADS);
    }

    #[test]
    fn test_normalize_items_with_prices_and_images() {
        let raw = json!([
            {
                "product_name": "Full checkup",
                "product_cash_price": 5000,
                "product_url": "https://example.com/p/1",
                "product_image_url": "https://example.com/i/1.jpg"
            },
            {
                "product_name": "Basic checkup",
                "product_cash_price": 1234567,
                "product_url": "https://example.com/p/2"
            }
        ]);

        let reply = ThreadAdapter.normalize_response(&raw);

        assert!(reply.text.starts_with("🎯 Found 2 contextual ads:"));
        assert!(reply.text.contains("1. Full checkup"));
        assert!(reply.text.contains("฿5,000"));
        assert!(reply.text.contains("฿1,234,567"));
        assert_eq!(reply.images, vec!["https://example.com/i/1.jpg"]);
    }

    #[test]
    fn test_normalize_missing_price_uses_placeholder() {
        let raw = json!([
            {"product_name": "A", "product_url": "https://example.com/a"},
            {"product_name": "B", "product_url": "https://example.com/b"}
        ]);

        let reply = ThreadAdapter.normalize_response(&raw);

        assert_eq!(reply.text.matches("฿N/A").count(), 2);
        assert!(reply.images.is_empty());
    }
}
