//! HTTP surface for the triage service.

pub mod routes;
