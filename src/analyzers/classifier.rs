//! Chat-model classification client.
//!
//! Sends the triage request to a chat-completions deployment with a tight
//! JSON-only prompt and parses the reply into an [`LlmClassification`].
//! Parsing is layered: strict JSON first (tolerating markdown fencing),
//! then a keyword fallback so a chatty model response still yields a usable
//! classification instead of a failed request.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::analyzers::{Classifier, trim_endpoint};
use crate::error::UpstreamError;
use crate::triage::types::{LlmClassification, TriageRequest};

const SERVICE: &str = "classifier";

/// Max suggested actions carried on a classification.
const MAX_ACTIONS: usize = 3;

/// Max tokens for the classification call — runs on every message.
const CLASSIFY_MAX_TOKENS: u32 = 250;

const SYSTEM_PROMPT: &str = "You are an email triage assistant for IT support. \
    Classify the email's priority as high, medium, or low and explain briefly.\n\n\
    Respond with ONLY a JSON object:\n\
    {\"priority\": \"...\", \"reason\": \"...\", \"actions\": [\"...\"]}\n\n\
    Rules:\n\
    - reason: one or two sentences\n\
    - actions: 1-3 short concrete next steps";

/// HTTP client for the chat-model service (deployment-style endpoint).
pub struct ChatClassifier {
    endpoint: String,
    api_key: SecretString,
    deployment: String,
    api_version: String,
    client: reqwest::Client,
}

impl ChatClassifier {
    pub fn new(
        endpoint: &str,
        api_key: SecretString,
        deployment: &str,
        api_version: &str,
        client: reqwest::Client,
    ) -> Self {
        Self {
            endpoint: trim_endpoint(endpoint),
            api_key,
            deployment: deployment.to_string(),
            api_version: api_version.to_string(),
            client,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

#[async_trait]
impl Classifier for ChatClassifier {
    async fn classify(
        &self,
        request: &TriageRequest,
    ) -> Result<LlmClassification, UpstreamError> {
        let body = serde_json::json!({
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": build_user_prompt(request)},
            ],
            "temperature": 0.0,
            "max_tokens": CLASSIFY_MAX_TOKENS,
        });

        let resp = self
            .client
            .post(self.completions_url())
            .header("api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::RequestFailed {
                service: SERVICE.into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::UnexpectedStatus {
                service: SERVICE.into(),
                status,
                body,
            });
        }

        let completion: ChatCompletionResponse =
            resp.json().await.map_err(|e| UpstreamError::InvalidResponse {
                service: SERVICE.into(),
                reason: e.to_string(),
            })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| UpstreamError::InvalidResponse {
                service: SERVICE.into(),
                reason: "no choices in completion response".into(),
            })?;

        Ok(parse_classification(&content))
    }
}

/// Build the user prompt from the triage request fields.
fn build_user_prompt(request: &TriageRequest) -> String {
    format!(
        "Subject: {}\nBody: {}\nSender: {}\nImportance: {}",
        request.subject,
        request.body,
        request.sender.as_deref().unwrap_or(""),
        request.importance.as_deref().unwrap_or(""),
    )
}

// ── Response parsing ────────────────────────────────────────────────

/// Fields the model is asked to emit.
#[derive(Debug, Deserialize)]
struct ClassificationFields {
    #[serde(default)]
    priority: String,
    #[serde(default)]
    reason: String,
    #[serde(default, alias = "suggested_actions")]
    actions: Vec<String>,
}

/// Parse a model reply into a classification.
///
/// Tries the JSON shape the prompt asks for; falls back to a keyword scan
/// of the raw text (priority from "high"/"low" mentions, default "medium",
/// actions from lines after an "Actions:" marker). Never fails — malformed
/// model output degrades, it does not error.
pub(crate) fn parse_classification(raw: &str) -> LlmClassification {
    if let Ok(fields) =
        serde_json::from_str::<ClassificationFields>(&extract_json_object(raw))
        && !fields.priority.is_empty()
    {
        let mut actions = fields.actions;
        actions.truncate(MAX_ACTIONS);
        return LlmClassification {
            priority: fields.priority,
            reason: if fields.reason.is_empty() {
                raw.trim().to_string()
            } else {
                fields.reason
            },
            suggested_actions: actions,
        };
    }

    keyword_fallback(raw)
}

/// Keyword heuristics over a free-text reply.
fn keyword_fallback(raw: &str) -> LlmClassification {
    let lower = raw.to_lowercase();

    let priority = if lower.contains("high") {
        "high"
    } else if lower.contains("low") {
        "low"
    } else {
        "medium"
    };

    let mut actions = Vec::new();
    let marker = raw.find("Actions:").or_else(|| raw.find("actions:"));
    if let Some(idx) = marker {
        actions = raw[idx + "Actions:".len()..]
            .lines()
            .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
            .filter(|line| !line.is_empty())
            .take(MAX_ACTIONS)
            .map(String::from)
            .collect();
    }

    LlmClassification {
        priority: priority.to_string(),
        reason: raw.trim().to_string(),
        suggested_actions: actions,
    }
}

/// Extract a JSON object from model output (handles markdown wrapping).
fn extract_json_object(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                return trimmed[start..=end].to_string();
            }
        }
    }

    trimmed.to_string()
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_has_deployment_and_version() {
        let client = ChatClassifier::new(
            "https://oai.example.com/",
            SecretString::from("key"),
            "gpt-4o-mini",
            "2024-08-01-preview",
            reqwest::Client::new(),
        );
        assert_eq!(
            client.completions_url(),
            "https://oai.example.com/openai/deployments/gpt-4o-mini/chat/completions?api-version=2024-08-01-preview"
        );
    }

    #[test]
    fn user_prompt_contains_all_fields() {
        let request = TriageRequest {
            subject: "Cannot access VPN".into(),
            body: "Disconnects every 2 minutes.".into(),
            sender: Some("alex@contoso.com".into()),
            importance: Some("High".into()),
            ..Default::default()
        };
        let prompt = build_user_prompt(&request);
        assert!(prompt.contains("Subject: Cannot access VPN"));
        assert!(prompt.contains("Body: Disconnects"));
        assert!(prompt.contains("Sender: alex@contoso.com"));
        assert!(prompt.contains("Importance: High"));
    }

    // ── Parsing tests ───────────────────────────────────────────────

    #[test]
    fn parses_strict_json() {
        let parsed = parse_classification(
            r#"{"priority": "high", "reason": "outage", "actions": ["Page on-call"]}"#,
        );
        assert_eq!(parsed.priority, "high");
        assert_eq!(parsed.reason, "outage");
        assert_eq!(parsed.suggested_actions, ["Page on-call"]);
    }

    #[test]
    fn parses_markdown_fenced_json() {
        let parsed = parse_classification(
            "Here is my assessment:\n```json\n{\"priority\": \"low\", \"reason\": \"newsletter\", \"actions\": []}\n```",
        );
        assert_eq!(parsed.priority, "low");
        assert_eq!(parsed.reason, "newsletter");
        assert!(parsed.suggested_actions.is_empty());
    }

    #[test]
    fn parses_embedded_json_object() {
        let parsed = parse_classification(
            "Assessment: {\"priority\": \"medium\", \"reason\": \"routine ask\"}",
        );
        assert_eq!(parsed.priority, "medium");
        assert_eq!(parsed.reason, "routine ask");
    }

    #[test]
    fn json_actions_are_capped() {
        let parsed = parse_classification(
            r#"{"priority": "medium", "reason": "r", "actions": ["a", "b", "c", "d", "e"]}"#,
        );
        assert_eq!(parsed.suggested_actions.len(), 3);
    }

    #[test]
    fn accepts_suggested_actions_alias() {
        let parsed = parse_classification(
            r#"{"priority": "low", "reason": "r", "suggested_actions": ["archive"]}"#,
        );
        assert_eq!(parsed.suggested_actions, ["archive"]);
    }

    #[test]
    fn falls_back_to_keywords_on_free_text() {
        let parsed = parse_classification(
            "This looks like a high priority outage affecting the whole team.",
        );
        assert_eq!(parsed.priority, "high");
        assert!(parsed.reason.contains("outage"));
    }

    #[test]
    fn keyword_fallback_defaults_to_medium() {
        let parsed = parse_classification("A routine request for a password change.");
        assert_eq!(parsed.priority, "medium");
    }

    #[test]
    fn keyword_fallback_extracts_action_lines() {
        let parsed = parse_classification(
            "Low priority.\nActions:\n- Archive the thread\n- Send the self-service link\n- Close ticket\n- Extra ignored",
        );
        assert_eq!(parsed.priority, "low");
        assert_eq!(
            parsed.suggested_actions,
            ["Archive the thread", "Send the self-service link", "Close ticket"]
        );
    }

    #[test]
    fn empty_json_reason_falls_back_to_raw_text() {
        let parsed = parse_classification(r#"{"priority": "medium"}"#);
        assert_eq!(parsed.priority, "medium");
        assert!(!parsed.reason.is_empty());
    }
}
