//! Environment-driven configuration.
//!
//! Endpoints and keys for the three upstream services, plus the results
//! directory and bind address. Keys are held as [`SecretString`] and are
//! never logged.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default chat-model deployment when `OPENAI_DEPLOYMENT` is unset.
const DEFAULT_DEPLOYMENT: &str = "gpt-4o-mini";

/// Default API version for the chat-model service.
const DEFAULT_API_VERSION: &str = "2024-08-01-preview";

/// Service configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Content-safety service endpoint (e.g. `https://<res>.cognitiveservices.azure.com`).
    pub content_safety_endpoint: String,
    pub content_safety_key: SecretString,
    /// Sentiment (language) service endpoint.
    pub language_endpoint: String,
    pub language_key: SecretString,
    /// Chat-model service endpoint.
    pub openai_endpoint: String,
    pub openai_key: SecretString,
    /// Deployment name of the chat model.
    pub openai_deployment: String,
    pub openai_api_version: String,
    /// Directory where finished triage records are written.
    pub results_dir: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Per-request timeout for each upstream call.
    pub upstream_timeout: Duration,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Endpoints and keys for all three upstream services are required;
    /// everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = std::env::var("TRIAGE_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        Ok(Self {
            content_safety_endpoint: require("CONTENT_SAFETY_ENDPOINT")?,
            content_safety_key: require("CONTENT_SAFETY_KEY")?.into(),
            language_endpoint: require("LANGUAGE_ENDPOINT")?,
            language_key: require("LANGUAGE_KEY")?.into(),
            openai_endpoint: require("OPENAI_ENDPOINT")?,
            openai_key: require("OPENAI_API_KEY")?.into(),
            openai_deployment: std::env::var("OPENAI_DEPLOYMENT")
                .unwrap_or_else(|_| DEFAULT_DEPLOYMENT.to_string()),
            openai_api_version: std::env::var("OPENAI_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            results_dir: std::env::var("TRIAGE_RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/results")),
            bind_addr: std::env::var("TRIAGE_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:7071".to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn require(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
