// Career intelligence: synthetic market, fitted models, heuristic scores and insights.
// CPU-bound engine calls must run inside tokio::task::spawn_blocking.

pub mod engine;
pub mod features;
pub mod handlers;
pub mod insights;
pub mod models;
pub mod population;
pub mod scoring;
pub mod tables;
pub mod training;

pub use engine::{CareerEngine, EngineError};
