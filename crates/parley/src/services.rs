//! Per-service adapters.
//!
//! Every backend speaks its own request and response schema. Each schema
//! family gets one adapter implementing [`base::ServiceAdapter`], and the
//! [`factory`] table maps service ids onto adapters, so adding a backend
//! never touches an existing mapping.
pub mod assistant;
pub mod base;
pub mod copilot;
pub mod event;
pub mod factory;
pub mod fallback;
pub mod thread;
pub mod web;
pub mod wire;
