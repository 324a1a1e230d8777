//! Mail Triage — AI-assisted email triage service.
//!
//! Inbound email-like text is analyzed by three upstream services (content
//! safety, sentiment, chat model); their outputs are combined into a single
//! deterministic priority + routing decision, persisted as a JSON artifact,
//! and returned over HTTP.

pub mod analyzers;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod triage;
