use std::str::FromStr;

use super::assistant::AssistantAdapter;
use super::base::ServiceAdapter;
use super::copilot::CopilotAdapter;
use super::event::EventAdapter;
use super::fallback::FallbackAdapter;
use super::thread::ThreadAdapter;
use super::web::WebIntelligenceAdapter;
use crate::registry::ServiceId;

/// The lookup table from service id to schema-family adapter. Adapters are
/// stateless, so one static instance per family serves every session.
pub fn adapter_for(id: ServiceId) -> &'static dyn ServiceAdapter {
    match id {
        ServiceId::ConversationalMain | ServiceId::ConversationalSpecialist => &AssistantAdapter,
        ServiceId::WebIntelligence => &WebIntelligenceAdapter,
        ServiceId::GeneralAssistant => &CopilotAdapter,
        ServiceId::ContextualAds => &ThreadAdapter,
        ServiceId::Summarization => &EventAdapter,
    }
}

/// Resolve an id string, falling back to the catch-all adapter for anything
/// outside the catalog.
pub fn adapter_for_name(id: &str) -> &'static dyn ServiceAdapter {
    match ServiceId::from_str(id) {
        Ok(id) => adapter_for(id),
        Err(_) => &FallbackAdapter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::base::OutgoingTurn;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_service_has_an_adapter() {
        let turn = OutgoingTurn::text_only(&[], "ping", 7);
        for id in ServiceId::iter() {
            let body = adapter_for(id).format_request(&turn);
            assert!(body.is_object(), "{id} produced a non-object body");
        }
    }

    #[test]
    fn test_unknown_id_falls_back() {
        let turn = OutgoingTurn::text_only(&[], "ping", 7);
        let body = adapter_for_name("mystery-service").format_request(&turn);
        assert_eq!(body, json!({"message": "ping"}));
    }

    #[test]
    fn test_known_name_resolves() {
        let turn = OutgoingTurn::text_only(&[], "ping", 7);
        let body = adapter_for_name("summarization").format_request(&turn);
        assert_eq!(body["event"]["type"], "app_mention");
    }
}
