use strum_macros::{Display, EnumIter, EnumString};

/// The fixed catalog of backend services the harness can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ServiceId {
    ConversationalMain,
    ConversationalSpecialist,
    WebIntelligence,
    GeneralAssistant,
    ContextualAds,
    Summarization,
}

/// Display metadata and routing for one catalogued backend. Defined at
/// process start, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub name: &'static str,
    pub endpoint: &'static str,
    pub description: &'static str,
}

pub const SERVICES: [ServiceDescriptor; 6] = [
    ServiceDescriptor {
        id: ServiceId::ConversationalMain,
        name: "Conversational (Main)",
        endpoint: "/assistant/chat",
        description: "Main conversational assistant with image support",
    },
    ServiceDescriptor {
        id: ServiceId::ConversationalSpecialist,
        name: "Conversational (Specialist)",
        endpoint: "/specialist/chat",
        description: "Domain specialist chatbot",
    },
    ServiceDescriptor {
        id: ServiceId::WebIntelligence,
        name: "Web Intelligence",
        endpoint: "/web/chat",
        description: "Web intelligence and catalog search",
    },
    ServiceDescriptor {
        id: ServiceId::GeneralAssistant,
        name: "General Assistant",
        endpoint: "/copilot/",
        description: "General assistant and co-pilot",
    },
    ServiceDescriptor {
        id: ServiceId::ContextualAds,
        name: "Contextual Ads",
        endpoint: "/ads/chat",
        description: "Contextual advertisement recommendations",
    },
    ServiceDescriptor {
        id: ServiceId::Summarization,
        name: "Summarization",
        endpoint: "/summarize/slack",
        description: "URL summarization service",
    },
];

impl ServiceDescriptor {
    pub fn lookup(id: ServiceId) -> &'static ServiceDescriptor {
        SERVICES
            .iter()
            .find(|descriptor| descriptor.id == id)
            .expect("every ServiceId has a catalog entry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = SERVICES.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SERVICES.len());
    }

    #[test]
    fn test_every_id_has_an_entry() {
        for id in ServiceId::iter() {
            let descriptor = ServiceDescriptor::lookup(id);
            assert_eq!(descriptor.id, id);
            assert!(descriptor.endpoint.starts_with('/'));
        }
    }

    #[test]
    fn test_id_string_round_trip() {
        assert_eq!(ServiceId::ContextualAds.to_string(), "contextual-ads");
        assert_eq!(
            ServiceId::from_str("web-intelligence").unwrap(),
            ServiceId::WebIntelligence
        );
        assert!(ServiceId::from_str("not-a-service").is_err());
    }
}
