//! Free-form conversation text to role-tagged utterances.
//!
//! The custom input mode lets an operator paste a conversation naturally,
//! one utterance per line ("User: ..." / "Assistant: ..."), instead of
//! hand-writing the wire JSON.

use crate::models::message::Utterance;

const USER_PREFIX: &str = "User:";
const ASSISTANT_PREFIX: &str = "Assistant:";

/// Parse "Role: text" lines into an ordered utterance sequence.
///
/// Blank lines are skipped. Lines matching neither prefix are dropped
/// silently rather than rejected, so a pasted transcript with stray
/// annotations still parses. Prefixes are case-sensitive.
pub fn parse_conversation(text: &str) -> Vec<Utterance> {
    let mut conversation = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix(USER_PREFIX) {
            conversation.push(Utterance::user(rest.trim_start()));
        } else if let Some(rest) = trimmed.strip_prefix(ASSISTANT_PREFIX) {
            conversation.push(Utterance::assistant(rest.trim_start()));
        }
    }

    conversation
}
