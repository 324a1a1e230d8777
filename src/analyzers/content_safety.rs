//! Content-safety service client.
//!
//! Calls the text-analysis endpoint with the four standing harm categories
//! and returns the raw per-category severities for the safety mapper.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::analyzers::{ContentSafety, trim_endpoint};
use crate::error::UpstreamError;
use crate::triage::types::RawCategoryScore;

const SERVICE: &str = "content-safety";

const API_VERSION: &str = "2024-09-01";

/// Categories requested on every analysis call.
const CATEGORIES: [&str; 4] = ["Hate", "Violence", "SelfHarm", "Sexual"];

/// HTTP client for the content-safety service.
pub struct ContentSafetyClient {
    endpoint: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ContentSafetyClient {
    pub fn new(endpoint: &str, api_key: SecretString, client: reqwest::Client) -> Self {
        Self {
            endpoint: trim_endpoint(endpoint),
            api_key,
            client,
        }
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/contentsafety/text:analyze?api-version={API_VERSION}",
            self.endpoint
        )
    }
}

#[async_trait]
impl ContentSafety for ContentSafetyClient {
    async fn analyze(&self, text: &str) -> Result<Vec<RawCategoryScore>, UpstreamError> {
        let body = serde_json::json!({
            "text": text,
            "categories": CATEGORIES,
        });

        let resp = self
            .client
            .post(self.analyze_url())
            .header("Ocp-Apim-Subscription-Key", self.api_key.expose_secret())
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

        let analysis: AnalyzeTextResponse =
            resp.json().await.map_err(|e| UpstreamError::InvalidResponse {
                service: SERVICE.into(),
                reason: e.to_string(),
            })?;

        Ok(analysis
            .categories_analysis
            .into_iter()
            .map(|c| RawCategoryScore {
                category: c.category,
                severity: c.severity,
            })
            .collect())
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextResponse {
    /// Absent in some error-shaped bodies — treated as an empty report.
    #[serde(default)]
    categories_analysis: Vec<CategoryAnalysis>,
}

#[derive(Debug, Deserialize)]
struct CategoryAnalysis {
    category: String,
    severity: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_url_includes_api_version() {
        let client = ContentSafetyClient::new(
            "https://safety.example.com/",
            SecretString::from("key"),
            reqwest::Client::new(),
        );
        assert_eq!(
            client.analyze_url(),
            format!("https://safety.example.com/contentsafety/text:analyze?api-version={API_VERSION}")
        );
    }

    #[test]
    fn response_parses_severities() {
        let raw = r#"{
            "categoriesAnalysis": [
                {"category": "Hate", "severity": 2},
                {"category": "Violence", "severity": 6},
                {"category": "SelfHarm"}
            ]
        }"#;
        let parsed: AnalyzeTextResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.categories_analysis.len(), 3);
        assert_eq!(parsed.categories_analysis[1].severity, Some(6));
        assert_eq!(parsed.categories_analysis[2].severity, None);
    }

    #[test]
    fn response_without_analysis_is_empty() {
        let parsed: AnalyzeTextResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.categories_analysis.is_empty());
    }
}
