use serde_json::Value;

use crate::intake::ImageAttachment;
use crate::models::link::LinkInfo;
use crate::models::message::Utterance;

/// Everything a formatter may draw on for one outgoing turn. The timestamp
/// is supplied by the caller so formatting stays a pure function of its
/// inputs.
#[derive(Debug, Clone, Copy)]
pub struct OutgoingTurn<'a> {
    pub history: &'a [Utterance],
    pub input: &'a str,
    pub attachments: &'a [ImageAttachment],
    /// Explicit thread name for the custom input mode; when absent,
    /// thread-based services derive one from the timestamp.
    pub thread_name: Option<&'a str>,
    pub sent_at: i64,
}

impl<'a> OutgoingTurn<'a> {
    pub fn text_only(history: &'a [Utterance], input: &'a str, sent_at: i64) -> Self {
        OutgoingTurn {
            history,
            input,
            attachments: &[],
            thread_name: None,
            sent_at,
        }
    }
}

/// The uniform result of normalizing one backend reply. The raw payload is
/// retained by the session alongside these fields, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedReply {
    pub text: String,
    pub images: Vec<String>,
    pub suggested_prompts: Vec<String>,
    pub related_links: Vec<LinkInfo>,
}

impl NormalizedReply {
    pub fn text<S: Into<String>>(text: S) -> Self {
        NormalizedReply {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// One request/response schema family. Implementations must be stateless:
/// both operations are pure functions of their arguments.
pub trait ServiceAdapter: Send + Sync {
    /// Build the exact request body this service family expects.
    fn format_request(&self, turn: &OutgoingTurn) -> Value;

    /// Map a raw reply into the uniform display fields. Must never fail:
    /// an unrecognized shape degrades to best-effort stringification.
    fn normalize_response(&self, raw: &Value) -> NormalizedReply;
}

/// Fallback literals shown when a backend omits the expected field.
pub mod defaults {
    pub const NO_RESPONSE: &str = "No response received";
    pub const PROCESSING_DONE: &str = "Processing complete!";
    pub const NO_ADS: &str = "🎯 No contextual ads found";
    pub const MISSING_PRICE: &str = "N/A";
}
