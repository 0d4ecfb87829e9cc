// SPDX-License-Identifier: MIT

//! Fansite API Server
//!
//! Serves the public content endpoints, the point-card loyalty proxy,
//! and the admin console's record mutations.

use fansite_api::{config::Config, db::Db, services::PointCardService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Fansite API");

    if config.point_card_api_key.is_none() {
        // Deliberately not fatal: claim/fetch answer with a configuration
        // error until the key is provisioned.
        tracing::warn!("POINT_CARD_API_KEY is not set; point-card routes will fail");
    }

    // Open the database and run migrations
    let db = Db::new(&config.database_url)
        .await
        .expect("Failed to open database");

    // Point-card service (claim/fetch proxy to the edge function)
    let point_card = PointCardService::new(
        config.point_card_function_url.clone(),
        config.point_card_api_key.clone(),
        db.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        point_card,
    });

    // Build router
    let app = fansite_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fansite_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
