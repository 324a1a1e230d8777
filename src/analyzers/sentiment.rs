//! Sentiment analysis service client.
//!
//! Submits the message body as a single document to the language service's
//! sentiment task and returns the first document's verdict.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::analyzers::{SentimentAnalysis, trim_endpoint};
use crate::error::UpstreamError;
use crate::triage::types::{SentimentResult, SentimentScores};

const SERVICE: &str = "sentiment";

const API_VERSION: &str = "2023-04-01";

/// HTTP client for the sentiment (language) service.
pub struct SentimentClient {
    endpoint: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl SentimentClient {
    pub fn new(endpoint: &str, api_key: SecretString, client: reqwest::Client) -> Self {
        Self {
            endpoint: trim_endpoint(endpoint),
            api_key,
            client,
        }
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/language/:analyze-text?api-version={API_VERSION}",
            self.endpoint
        )
    }
}

#[async_trait]
impl SentimentAnalysis for SentimentClient {
    async fn analyze(&self, text: &str) -> Result<SentimentResult, UpstreamError> {
        let body = serde_json::json!({
            "kind": "SentimentAnalysis",
            "analysisInput": {
                "documents": [
                    {"id": "1", "language": "en", "text": text}
                ]
            }
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

        let doc = analysis
            .results
            .documents
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::InvalidResponse {
                service: SERVICE.into(),
                reason: "no documents in sentiment response".into(),
            })?;

        Ok(SentimentResult {
            sentiment: doc.sentiment,
            confidence: SentimentScores {
                positive: doc.confidence_scores.positive,
                neutral: doc.confidence_scores.neutral,
                negative: doc.confidence_scores.negative,
            },
        })
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AnalyzeTextResponse {
    results: SentimentResults,
}

#[derive(Debug, Deserialize)]
struct SentimentResults {
    #[serde(default)]
    documents: Vec<SentimentDocument>,
}

#[derive(Debug, Deserialize)]
struct SentimentDocument {
    sentiment: String,
    #[serde(rename = "confidenceScores")]
    confidence_scores: ConfidenceScores,
}

#[derive(Debug, Deserialize)]
struct ConfidenceScores {
    positive: f64,
    neutral: f64,
    negative: f64,
}
