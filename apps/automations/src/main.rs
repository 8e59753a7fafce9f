mod attachments;
mod automations;
mod config;
mod errors;
mod llm_client;
mod record_store;
mod routes;
mod state;
mod triggers;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::attachments::HttpTextSource;
use crate::automations::Clients;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::record_store::AirtableClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting candidate automations v{}", env!("CARGO_PKG_VERSION"));

    let store = AirtableClient::new(
        config.airtable_api_url.clone(),
        config.airtable_base_id.clone(),
        config.airtable_access_token.clone(),
    )?;
    info!("Record store client initialized (base: {})", config.airtable_base_id);

    let mut llm = LlmClient::new(config.anthropic_api_key.clone())?;
    if let Some(api_url) = &config.anthropic_api_url {
        llm = llm.with_api_url(api_url.clone());
    }
    if let Some(model) = &config.anthropic_model {
        llm = llm.with_model(model.clone());
    }
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        clients: Clients {
            store: Arc::new(store),
            llm: Arc::new(llm),
            attachments: Arc::new(HttpTextSource::new()?),
        },
        config: config.clone(),
    };

    if state.config.trigger_token.is_none() {
        info!("TRIGGER_TOKEN not set; triggers are accepted without authentication");
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
