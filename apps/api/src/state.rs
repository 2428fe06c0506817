use std::sync::Arc;

use crate::config::Config;
use crate::intelligence::CareerEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// One engine per process: the reference population plus the fitted models.
    pub engine: Arc<CareerEngine>,
}
