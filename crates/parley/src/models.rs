//! These models represent the objects passed between the harness layers
//!
//! There are a few related shapes in play:
//! - Utterance: the role-tagged wire unit the service formatters consume as history
//! - ChatMessage: the renderer-facing turn, normalized from whatever a backend returned
//! - LinkInfo: related-link metadata some services attach to a reply
//!
//! Each backend speaks its own schema; we convert to and from these internal
//! structs at the adapter boundary so nothing downstream needs to know which
//! service produced a turn.
pub mod link;
pub mod message;
pub mod role;
