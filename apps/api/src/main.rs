mod config;
mod errors;
mod intelligence;
mod ml;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::intelligence::population::ReferencePopulation;
use crate::intelligence::training::ModelParams;
use crate::intelligence::CareerEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillForge API v{}", env!("CARGO_PKG_VERSION"));

    // Build the reference population and the engine that owns it
    let population = ReferencePopulation::generate(config.population_spec())?;
    let engine = Arc::new(CareerEngine::new(population, ModelParams::default()));

    if config.eager_training {
        spawn_eager_training(Arc::clone(&engine));
    } else {
        info!("Eager training disabled; models train on first request");
    }

    let state = AppState {
        config: config.clone(),
        engine,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Best-effort startup training. A failure only logs; the first prediction retries.
fn spawn_eager_training(engine: Arc<CareerEngine>) {
    tokio::spawn(async move {
        match tokio::task::spawn_blocking(move || engine.train_models()).await {
            Ok(Ok(scores)) => info!(
                "Startup training complete ({} samples)",
                scores.training_samples
            ),
            Ok(Err(e)) => warn!("Startup training failed, will retry on first use: {e}"),
            Err(e) => warn!("Startup training task panicked: {e}"),
        }
    });
}
