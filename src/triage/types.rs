//! Value objects for the triage pipeline.
//!
//! All entities are request-scoped: constructed fresh per triage request,
//! persisted or returned, then discarded. Nothing here is mutated after
//! construction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Safety ──────────────────────────────────────────────────────────

/// One entry of the raw per-category severity report, as parsed off the
/// content-safety wire. The mapper turns a slice of these into a
/// [`SafetyResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategoryScore {
    pub category: String,
    pub severity: Option<u8>,
}

/// A harm category with its reported severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyCategory {
    /// Harm category name as reported upstream (e.g. "Violence").
    pub category: String,
    /// Severity 0–6; `None` when the service omitted it. A missing severity
    /// never contributes to a block.
    pub severity: Option<u8>,
}

/// Normalized content-safety verdict.
///
/// `blocked` is derived by the mapper, never set independently: it is true
/// iff at least one category severity reached the block threshold. Category
/// order preserves the upstream report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyResult {
    pub blocked: bool,
    pub categories: Vec<SafetyCategory>,
}

// ── Sentiment ───────────────────────────────────────────────────────

/// Per-label sentiment confidences in [0,1].
///
/// Upstream floating-point output — the three values are not required to
/// sum to 1 and are never renormalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Sentiment analysis outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    /// "positive" / "neutral" / "negative" — compared case-insensitively
    /// downstream, never validated here.
    pub sentiment: String,
    pub confidence: SentimentScores,
}

// ── Model classification ────────────────────────────────────────────

/// Free-form classification from the chat model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmClassification {
    /// Expected "high"/"medium"/"low" but not enforced — an unexpected
    /// value passes through the combinator unchanged.
    pub priority: String,
    /// Free-text rationale; may be empty.
    pub reason: String,
    /// 0–3 short suggested actions.
    #[serde(default)]
    pub suggested_actions: Vec<String>,
}

// ── Request / record ────────────────────────────────────────────────

/// Inbound triage request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageRequest {
    pub subject: String,
    pub body: String,
    pub sender: Option<String>,
    pub to: Option<Vec<String>>,
    pub headers: HashMap<String, serde_json::Value>,
    pub importance: Option<String>,
}

/// Identifying metadata attached to a finished record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Generated UUID; also the artifact name (`<id>.json`).
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub subject: String,
    pub sender: Option<String>,
}

/// The final triage record — combined decision plus everything that fed it.
///
/// Created once per request, persisted verbatim, returned as the response
/// body, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageRecord {
    pub safety: SafetyResult,
    pub sentiment: SentimentResult,
    pub gpt: LlmClassification,
    /// One of "blocked"/"high"/"medium"/"low" in practice, but carries any
    /// lower-cased model priority through unchanged.
    pub combined_priority: String,
    pub routing_hint: String,
    pub metadata: RecordMetadata,
}
