//! Upstream analyzer clients.
//!
//! The traits are the collaborator boundary: the triage processor consumes
//! already-parsed results and never sees HTTP. Implementations speak the
//! Azure-shaped REST APIs with a shared `reqwest::Client` whose timeout is
//! set at construction time in `main`.

mod classifier;
mod content_safety;
mod sentiment;

pub use classifier::ChatClassifier;
pub use content_safety::ContentSafetyClient;
pub use sentiment::SentimentClient;

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::triage::types::{
    LlmClassification, RawCategoryScore, SentimentResult, TriageRequest,
};

/// Content-safety classifier — per-category harm severities for a text.
#[async_trait]
pub trait ContentSafety: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Vec<RawCategoryScore>, UpstreamError>;
}

/// Sentiment analyzer — overall sentiment plus per-label confidences.
#[async_trait]
pub trait SentimentAnalysis: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<SentimentResult, UpstreamError>;
}

/// Chat-model classifier — priority/reason/actions for a triage request.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        request: &TriageRequest,
    ) -> Result<LlmClassification, UpstreamError>;
}

/// Strip a single trailing slash so endpoint joins stay predictable.
pub(crate) fn trim_endpoint(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}
