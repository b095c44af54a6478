//! Finans Uzmanı HTTP Server
//!
//! Axum server exposing the rule-based market opinion endpoint, a daily
//! refresh hook and an admin stats view.

mod config;
mod handlers;
mod routes;
mod state;
mod usage;

use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_opinion::{Advisor, AdvisorConfig};
use opinion_core::MemorySessionStore;

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let advisor_config = AdvisorConfig::from_env();

    let store = Arc::new(MemorySessionStore::new(
        config.session_capacity,
        config.session_idle,
    ));
    let advisor = Advisor::new(&advisor_config, store)?;

    tracing::info!(
        confidence_min = advisor_config.confidence_min,
        confidence_max = advisor_config.confidence_max,
        instrument_intros = advisor_config.instrument_intros,
        pro_daily_limit = advisor_config.pro_daily_limit,
        "✓ Advisor ready"
    );

    match config.daily_request_limit {
        Some(limit) => tracing::info!("✓ Daily request limit: {} per client", limit),
        None => tracing::info!("  Daily request limit disabled"),
    }
    if config.admin_token.is_none() {
        tracing::warn!("⚠ ADMIN_TOKEN not set - /admin/stats disabled");
    }

    let state = AppState::new(advisor, config.clone());

    // Daily refresh, checked hourly
    let refresher = state.clone();
    let interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if refresher.refresh(Utc::now().date_naive()) {
                tracing::info!("Daily refresh completed");
            }
        }
    });

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 Finans Uzmanı server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /               - Banner");
    tracing::info!("  GET  /health         - Health check");
    tracing::info!("  POST /finans-uzmani  - Ask for an opinion");
    tracing::info!("  POST /check-update   - Daily refresh");
    tracing::info!("  GET  /admin/stats    - Usage stats (bearer token)");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
