//! Triage orchestrator — fans out to the three analyzers, combines their
//! outputs, and persists the finished record.
//!
//! Flow:
//! 1. Content safety + sentiment + chat classification, issued concurrently
//! 2. Safety mapping → security overrides → priority combination → routing
//! 3. Record assembly (generated id, UTC timestamp) → artifact store
//!
//! All three upstream results are mandatory; any failure fails the whole
//! request rather than silently degrading the decision.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::info;
use uuid::Uuid;

use crate::analyzers::{Classifier, ContentSafety, SentimentAnalysis};
use crate::error::Error;
use crate::store::ResultStore;
use crate::triage::combine::{apply_security_overrides, combine_priority};
use crate::triage::routing::routing_hint;
use crate::triage::safety::map_safety;
use crate::triage::types::{RecordMetadata, TriageRecord, TriageRequest};

/// Orchestrates one triage request end to end.
pub struct TriageProcessor {
    safety: Arc<dyn ContentSafety>,
    sentiment: Arc<dyn SentimentAnalysis>,
    classifier: Arc<dyn Classifier>,
    store: Arc<dyn ResultStore>,
}

impl TriageProcessor {
    pub fn new(
        safety: Arc<dyn ContentSafety>,
        sentiment: Arc<dyn SentimentAnalysis>,
        classifier: Arc<dyn Classifier>,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            safety,
            sentiment,
            classifier,
            store,
        }
    }

    /// Run the full triage pipeline for one request.
    pub async fn triage(&self, request: TriageRequest) -> Result<TriageRecord, Error> {
        info!(
            subject = %request.subject,
            sender = request.sender.as_deref().unwrap_or(""),
            "Processing triage request"
        );

        // No data dependency between the three upstream calls; issue them
        // concurrently and join before the decision.
        let (report, sentiment, classification) = tokio::try_join!(
            self.safety.analyze(&request.body),
            self.sentiment.analyze(&request.body),
            self.classifier.classify(&request),
        )?;

        let safety = map_safety(Some(&report));
        let gpt = apply_security_overrides(&safety, classification);
        let combined_priority = combine_priority(&safety, &sentiment, &gpt);
        let routing = routing_hint(&combined_priority);

        info!(
            priority = %combined_priority,
            route = routing,
            blocked = safety.blocked,
            "Triage decision"
        );

        let record = TriageRecord {
            safety,
            sentiment,
            gpt,
            combined_priority,
            routing_hint: routing.to_string(),
            metadata: RecordMetadata {
                id: Uuid::new_v4().to_string(),
                timestamp: Utc::now().trunc_subsecs(0),
                subject: request.subject,
                sender: request.sender,
            },
        };

        let name = format!("{}.json", record.metadata.id);
        self.store.put(&name, &record).await?;

        Ok(record)
    }
}
