//! The conversation state machine: owns the ordered history, the selected
//! service, and the in-flight flag, and drives format → transport →
//! normalize for each turn.

use chrono::Utc;
use serde_json::Value;

use crate::intake::AttachmentSet;
use crate::models::message::{ChatMessage, Utterance};
use crate::parser::parse_conversation;
use crate::registry::{ServiceDescriptor, ServiceId};
use crate::services::base::{OutgoingTurn, ServiceAdapter};
use crate::services::factory::adapter_for;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The turn completed: one user message and one assistant (or error)
    /// message were appended.
    Sent,
    /// A request was already in flight; nothing changed.
    Busy,
    /// Empty input with no attachments; nothing changed.
    NothingToSend,
    /// No service selected; nothing changed.
    NoService,
}

pub struct ChatSession {
    transport: Box<dyn Transport>,
    service: Option<&'static ServiceDescriptor>,
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl ChatSession {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        ChatSession {
            transport,
            service: None,
            messages: Vec::new(),
            pending: false,
        }
    }

    /// Menu → conversation: selecting a service starts an empty history.
    pub fn select(&mut self, id: ServiceId) {
        self.service = Some(ServiceDescriptor::lookup(id));
        self.messages.clear();
        self.pending = false;
    }

    /// Conversation → menu: history does not survive the transition.
    pub fn back_to_menu(&mut self) {
        self.service = None;
        self.messages.clear();
        self.pending = false;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn service(&self) -> Option<&'static ServiceDescriptor> {
        self.service
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Send one turn through the full pipeline. The user message is appended
    /// optimistically before the network call; the pending flag is the sole
    /// guard against a second in-flight request and is cleared on every
    /// path, including transport failure.
    pub async fn send(&mut self, input: &str, attachments: &AttachmentSet) -> SendOutcome {
        let Some(service) = self.service else {
            return SendOutcome::NoService;
        };
        if self.pending {
            return SendOutcome::Busy;
        }
        if input.trim().is_empty() && attachments.is_empty() {
            return SendOutcome::NothingToSend;
        }

        // The formatter sees only durably appended turns; the new input
        // rides separately and the optimistic append happens after.
        let history: Vec<Utterance> = self.messages.iter().map(ChatMessage::as_utterance).collect();
        let staged = attachments.all();

        let user_message = ChatMessage::user()
            .with_text(input)
            .with_images(staged.iter().map(|a| a.preview.clone()).collect());
        self.messages.push(user_message);
        self.pending = true;

        let turn = OutgoingTurn {
            history: &history,
            input,
            attachments: &staged,
            thread_name: None,
            sent_at: Utc::now().timestamp(),
        };

        let adapter = adapter_for(service.id);
        let body = adapter.format_request(&turn);
        self.dispatch(service.endpoint, adapter, &body).await;

        SendOutcome::Sent
    }

    /// The custom input mode: an explicit thread name plus a pasted
    /// "User:/Assistant:" conversation, parsed into the request history.
    pub async fn send_thread(&mut self, thread_name: &str, conversation_text: &str) -> SendOutcome {
        let Some(service) = self.service else {
            return SendOutcome::NoService;
        };
        if self.pending {
            return SendOutcome::Busy;
        }
        if thread_name.trim().is_empty() || conversation_text.trim().is_empty() {
            return SendOutcome::NothingToSend;
        }

        let conversation = parse_conversation(conversation_text);

        let user_message = ChatMessage::user().with_text(format!(
            "Thread: {}\n\nConversation:\n{}",
            thread_name, conversation_text
        ));
        self.messages.push(user_message);
        self.pending = true;

        let turn = OutgoingTurn {
            history: &conversation,
            input: "",
            attachments: &[],
            thread_name: Some(thread_name),
            sent_at: Utc::now().timestamp(),
        };

        let adapter = adapter_for(service.id);
        let body = adapter.format_request(&turn);
        self.dispatch(service.endpoint, adapter, &body).await;

        SendOutcome::Sent
    }

    async fn dispatch(&mut self, endpoint: &str, adapter: &dyn ServiceAdapter, body: &Value) {
        let message = match self.transport.post(endpoint, body).await {
            Ok(raw) => {
                let reply = adapter.normalize_response(&raw);
                ChatMessage::assistant()
                    .with_text(reply.text)
                    .with_images(reply.images)
                    .with_suggested_prompts(reply.suggested_prompts)
                    .with_related_links(reply.related_links)
                    .with_raw(raw)
            }
            // The conversation is never left blocked: failures become turns.
            Err(e) => ChatMessage::assistant().with_text(format!("Error: {}", e)),
        };

        self.messages.push(message);
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{TransportError, TransportResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    type SeenRequests = Arc<Mutex<Vec<(String, Value)>>>;

    /// Canned transport recording each body it was given.
    struct StubTransport {
        reply: TransportResult<Value>,
        seen: SeenRequests,
    }

    impl StubTransport {
        fn replying(reply: Value) -> Self {
            StubTransport {
                reply: Ok(reply),
                seen: Arc::default(),
            }
        }

        fn failing(status: u16) -> Self {
            StubTransport {
                reply: Err(TransportError::Server(status)),
                seen: Arc::default(),
            }
        }

        fn seen(&self) -> SeenRequests {
            self.seen.clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn post(&self, path: &str, body: &Value) -> TransportResult<Value> {
            self.seen
                .lock()
                .unwrap()
                .push((path.to_string(), body.clone()));
            match &self.reply {
                Ok(value) => Ok(value.clone()),
                Err(TransportError::Server(status)) => Err(TransportError::Server(*status)),
                Err(_) => unreachable!(),
            }
        }
    }

    #[tokio::test]
    async fn test_send_appends_both_turns() {
        let mut session = ChatSession::new(Box::new(StubTransport::replying(
            json!({"response": "hello back"}),
        )));
        session.select(ServiceId::GeneralAssistant);

        let outcome = session.send("hello", &AttachmentSet::new()).await;

        assert_eq!(outcome, SendOutcome::Sent);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].text, "hello");
        assert_eq!(session.history()[1].text, "hello back");
        assert!(session.history()[1].raw.is_some());
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_send_without_service() {
        let mut session =
            ChatSession::new(Box::new(StubTransport::replying(json!({"response": "x"}))));

        let outcome = session.send("hello", &AttachmentSet::new()).await;

        assert_eq!(outcome, SendOutcome::NoService);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let mut session =
            ChatSession::new(Box::new(StubTransport::replying(json!({"response": "x"}))));
        session.select(ServiceId::GeneralAssistant);

        let outcome = session.send("   ", &AttachmentSet::new()).await;

        assert_eq!(outcome, SendOutcome::NothingToSend);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_pending_send_is_a_no_op() {
        let mut session =
            ChatSession::new(Box::new(StubTransport::replying(json!({"response": "x"}))));
        session.select(ServiceId::GeneralAssistant);
        session.pending = true;

        let outcome = session.send("hello", &AttachmentSet::new()).await;

        assert_eq!(outcome, SendOutcome::Busy);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_turn() {
        let mut session = ChatSession::new(Box::new(StubTransport::failing(503)));
        session.select(ServiceId::GeneralAssistant);

        let outcome = session.send("hello", &AttachmentSet::new()).await;

        assert_eq!(outcome, SendOutcome::Sent);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].text, "Error: Server error: 503");
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_formatter_sees_history_without_optimistic_turn() {
        let transport = StubTransport::replying(json!({"response": "reply"}));
        let seen = transport.seen();
        let mut session = ChatSession::new(Box::new(transport));
        session.select(ServiceId::GeneralAssistant);

        session.send("first", &AttachmentSet::new()).await;
        session.send("followup", &AttachmentSet::new()).await;

        let requests = seen.lock().unwrap();
        // First request: no prior history, just the new input.
        assert_eq!(requests[0].1["messages"].as_array().unwrap().len(), 1);
        // Second request: the two durable turns plus the new input, not the
        // optimistic copy of the input itself.
        let second = requests[1].1["messages"].as_array().unwrap();
        assert_eq!(second.len(), 3);
        assert_eq!(second[0]["content"], "first");
        assert_eq!(second[1]["content"], "reply");
        assert_eq!(second[2]["content"], "followup");
    }

    #[tokio::test]
    async fn test_send_routes_to_service_endpoint() {
        let transport = StubTransport::replying(json!("ok"));
        let seen = transport.seen();
        let mut session = ChatSession::new(Box::new(transport));
        session.select(ServiceId::Summarization);

        session.send("summarize this", &AttachmentSet::new()).await;

        let requests = seen.lock().unwrap();
        assert_eq!(requests[0].0, "/summarize/slack");
    }

    #[tokio::test]
    async fn test_send_thread_uses_explicit_name_and_parsed_history() {
        let mut session = ChatSession::new(Box::new(StubTransport::replying(json!([]))));
        session.select(ServiceId::ContextualAds);

        let outcome = session
            .send_thread("spring_campaign", "User: need a deal\nAssistant: on what?")
            .await;

        assert_eq!(outcome, SendOutcome::Sent);
        assert_eq!(session.history().len(), 2);
        assert!(session.history()[0].text.starts_with("Thread: spring_campaign"));
        assert_eq!(session.history()[1].text, "🎯 No contextual ads found");
    }

    #[tokio::test]
    async fn test_send_thread_requires_both_fields() {
        let mut session = ChatSession::new(Box::new(StubTransport::replying(json!([]))));
        session.select(ServiceId::ContextualAds);

        assert_eq!(
            session.send_thread("", "User: hi").await,
            SendOutcome::NothingToSend
        );
        assert_eq!(
            session.send_thread("name", "  ").await,
            SendOutcome::NothingToSend
        );
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_back_to_menu_clears_history() {
        let mut session =
            ChatSession::new(Box::new(StubTransport::replying(json!({"response": "x"}))));
        session.select(ServiceId::GeneralAssistant);
        session.send("hello", &AttachmentSet::new()).await;

        session.back_to_menu();

        assert!(session.service().is_none());
        assert!(session.history().is_empty());
    }
}
