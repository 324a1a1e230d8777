use std::sync::Arc;

use mail_triage::analyzers::{ChatClassifier, ContentSafetyClient, SentimentClient};
use mail_triage::config::Settings;
use mail_triage::server::routes::{TriageRouteState, triage_routes};
use mail_triage::store::FsResultStore;
use mail_triage::triage::processor::TriageProcessor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings = Settings::from_env()?;

    eprintln!("📬 Mail Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Triage API: http://{}/api/triage", settings.bind_addr);
    eprintln!("   Health: http://{}/api/health", settings.bind_addr);
    eprintln!("   Results: {}", settings.results_dir.display());
    eprintln!("   Model deployment: {}", settings.openai_deployment);
    eprintln!(
        "   Upstream timeout: {}s\n",
        settings.upstream_timeout.as_secs()
    );

    // One HTTP client, shared by all three analyzers.
    let http = reqwest::Client::builder()
        .timeout(settings.upstream_timeout)
        .build()?;

    let processor = Arc::new(TriageProcessor::new(
        Arc::new(ContentSafetyClient::new(
            &settings.content_safety_endpoint,
            settings.content_safety_key.clone(),
            http.clone(),
        )),
        Arc::new(SentimentClient::new(
            &settings.language_endpoint,
            settings.language_key.clone(),
            http.clone(),
        )),
        Arc::new(ChatClassifier::new(
            &settings.openai_endpoint,
            settings.openai_key.clone(),
            &settings.openai_deployment,
            &settings.openai_api_version,
            http,
        )),
        Arc::new(FsResultStore::new(&settings.results_dir)),
    ));

    let app = triage_routes(TriageRouteState { processor });

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "Triage server started");
    axum::serve(listener, app).await?;

    Ok(())
}
