pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::intelligence::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Career intelligence API
        .route(
            "/api/v1/career-intelligence/health",
            get(handlers::handle_engine_health),
        )
        .route(
            "/api/v1/career-intelligence/analyze",
            post(handlers::handle_analyze),
        )
        .route(
            "/api/v1/career-intelligence/metrics/:profile_id",
            get(handlers::handle_metrics),
        )
        .route(
            "/api/v1/career-intelligence/train-models",
            post(handlers::handle_train_models),
        )
        .route(
            "/api/v1/career-intelligence/market-analysis/:city/:industry",
            get(handlers::handle_market_analysis),
        )
        .route(
            "/api/v1/career-intelligence/skill-recommendations",
            get(handlers::handle_skill_recommendations),
        )
        .fallback(not_found)
        .with_state(state)
}
