//! Tax advisory API server
//!
//! Provides REST endpoints for:
//! - the AI tax assistant and its per-session chat history
//! - the old/new regime income tax calculator
//! - contact requests and document upload intake
//! - the service catalogue

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tax_api::config::Cli;
use tax_api::router::{cors_layer, create_router};
use tax_api::{AppState, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref())?;

    info!("Initializing tax advisory API...");
    let state = Arc::new(AppState::from_config(&cli).await?);

    let app = create_router(state).layer(cors_layer(&cli.cors_origins));

    info!("Starting tax advisory API on http://{}", cli.bind);
    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
