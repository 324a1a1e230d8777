//! Priority combination rules.
//!
//! Strict decision chain, first match wins:
//! 1. Safety block → "blocked". Overrides everything, including a
//!    model-asserted "low".
//! 2. Negative sentiment AND (the model's rationale mentions urgency OR the
//!    model already says "high") → "high". Sentiment corroborates an
//!    escalation; it never determines priority on its own.
//! 3. Otherwise the model's priority, lower-cased, passes through unchanged
//!    — unexpected upstream strings included.

use crate::triage::types::{LlmClassification, SafetyResult, SentimentResult};

/// Combine the three analysis results into the final priority label.
///
/// Total function: never fails, never returns an empty label for non-empty
/// model priorities.
pub fn combine_priority(
    safety: &SafetyResult,
    sentiment: &SentimentResult,
    gpt: &LlmClassification,
) -> String {
    if safety.blocked {
        return "blocked".to_string();
    }

    if sentiment.sentiment.eq_ignore_ascii_case("negative")
        && (gpt.reason.to_lowercase().contains("urgent")
            || gpt.priority.eq_ignore_ascii_case("high"))
    {
        return "high".to_string();
    }

    gpt.priority.to_lowercase()
}

/// Replace the model's classification with a fixed security playbook when
/// the safety service blocks the message.
///
/// A blocked record must not carry business-y model suggestions; the
/// persisted classification becomes the containment playbook instead.
/// Identity when not blocked.
pub fn apply_security_overrides(
    safety: &SafetyResult,
    gpt: LlmClassification,
) -> LlmClassification {
    if !safety.blocked {
        return gpt;
    }

    LlmClassification {
        priority: "blocked".to_string(),
        reason: "Content flagged by safety service (e.g., violence/gang coordination/contraband). \
                 Quarantine and escalate to security."
            .to_string(),
        suggested_actions: vec![
            "Quarantine the message (do not deliver to recipient).".to_string(),
            "Open an incident and notify Intelligence Unit / Security.".to_string(),
            "Preserve full headers and body for evidence.".to_string(),
            "Add sender/account to watchlist pending review.".to_string(),
        ],
    }
}
