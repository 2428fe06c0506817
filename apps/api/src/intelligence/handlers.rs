use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::intelligence::engine::{CareerEngine, EngineError};
use crate::intelligence::models::{
    CareerMetrics, Insights, MarketAnalysis, SkillRecommendation, TrainingScores,
};
use crate::intelligence::population::HireLabelMode;
use crate::models::profile::{ExperienceLevel, Profile};
use crate::state::AppState;

const IMPROVEMENT_TIMELINE: &str = "3-6 months for significant improvement";
const DEFAULT_TARGET_ROLE: &str = "Data Scientist";

const CAPABILITIES: [&str; 4] = [
    "Career Prediction Models",
    "Market Intelligence",
    "Skill Gap Analysis",
    "Portfolio Assessment",
];

#[derive(Serialize)]
pub struct EngineHealthResponse {
    pub status: &'static str,
    pub engine_trained: bool,
    pub reference_records: usize,
    pub population_seed: u64,
    pub hire_label_mode: HireLabelMode,
    pub eager_training: bool,
    pub version: &'static str,
    pub features: Vec<&'static str>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub insights: Insights,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub profile_id: String,
    #[serde(flatten)]
    pub metrics: CareerMetrics,
    pub predicted_experience_level: Option<ExperienceLevel>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct TrainResponse {
    pub training_status: &'static str,
    pub model_scores: TrainingScores,
    pub training_time_ms: u64,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct MarketAnalysisResponse {
    pub city: String,
    pub industry: String,
    pub market_data: MarketAnalysis,
    pub timestamp: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SkillQuery {
    pub current_python: Option<f64>,
    pub current_sql: Option<f64>,
    pub current_ml: Option<f64>,
    pub current_communication: Option<f64>,
    pub target_role: Option<String>,
}

#[derive(Serialize)]
pub struct SkillRecommendationsResponse {
    pub target_role: String,
    pub skill_recommendations: Vec<SkillRecommendation>,
    pub current_skill_gap_score: f64,
    pub improvement_timeline: &'static str,
    pub timestamp: String,
}

/// Runs a CPU-bound engine call off the async executor.
async fn run_engine<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&CareerEngine) -> Result<T, EngineError> + Send + 'static,
{
    let engine = Arc::clone(&state.engine);
    let result = tokio::task::spawn_blocking(move || op(&engine))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in career engine: {e}"))
        })?;
    Ok(result?)
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn required_segment(name: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// GET /api/v1/career-intelligence/health
pub async fn handle_engine_health(State(state): State<AppState>) -> Json<EngineHealthResponse> {
    let spec = state.engine.population().spec();
    Json(EngineHealthResponse {
        status: "healthy",
        engine_trained: state.engine.is_trained(),
        reference_records: state.engine.population().len(),
        population_seed: spec.seed,
        hire_label_mode: spec.hire_label,
        eager_training: state.config.eager_training,
        version: env!("CARGO_PKG_VERSION"),
        features: CAPABILITIES.to_vec(),
        timestamp: now(),
    })
}

/// POST /api/v1/career-intelligence/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let resolved = profile.resolve();
    info!(
        "Career analysis requested for {}, {}",
        resolved.city, resolved.industry
    );
    let insights =
        run_engine(&state, move |engine| engine.generate_career_insights(&profile)).await?;
    Ok(Json(AnalyzeResponse {
        insights,
        timestamp: now(),
    }))
}

/// GET /api/v1/career-intelligence/metrics/:profile_id
pub async fn handle_metrics(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Query(profile): Query<Profile>,
) -> Result<Json<MetricsResponse>, AppError> {
    let assessment = run_engine(&state, move |engine| engine.assess(&profile)).await?;
    Ok(Json(MetricsResponse {
        profile_id,
        metrics: assessment.metrics,
        predicted_experience_level: assessment.predicted_experience_level,
        timestamp: now(),
    }))
}

/// POST /api/v1/career-intelligence/train-models
pub async fn handle_train_models(
    State(state): State<AppState>,
) -> Result<Json<TrainResponse>, AppError> {
    let started = Instant::now();
    let model_scores = run_engine(&state, |engine| engine.train_models()).await?;
    let training_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    Ok(Json(TrainResponse {
        training_status: "completed",
        model_scores,
        training_time_ms,
        timestamp: now(),
    }))
}

/// GET /api/v1/career-intelligence/market-analysis/:city/:industry
pub async fn handle_market_analysis(
    State(state): State<AppState>,
    Path((city, industry)): Path<(String, String)>,
) -> Result<Json<MarketAnalysisResponse>, AppError> {
    let city = required_segment("city", &city)?;
    let industry = required_segment("industry", &industry)?;

    let sample = Profile {
        city: Some(city.clone()),
        industry: Some(industry.clone()),
        experience_level: Some(ExperienceLevel::Intermediate.name().to_string()),
        education: Some("Bachelor".to_string()),
        python_skill: Some(6.0),
        sql_skill: Some(6.0),
        ml_skill: Some(4.0),
        communication_skill: Some(7.0),
        portfolio_projects: Some(3),
        github_commits: Some(100),
        years_experience: Some(3.0),
    };
    let insights =
        run_engine(&state, move |engine| engine.generate_career_insights(&sample)).await?;

    Ok(Json(MarketAnalysisResponse {
        city,
        industry,
        market_data: insights.market_analysis,
        timestamp: now(),
    }))
}

/// GET /api/v1/career-intelligence/skill-recommendations
pub async fn handle_skill_recommendations(
    State(state): State<AppState>,
    Query(query): Query<SkillQuery>,
) -> Result<Json<SkillRecommendationsResponse>, AppError> {
    let sample = Profile {
        city: Some("Toronto".to_string()),
        industry: Some("Tech".to_string()),
        experience_level: Some(ExperienceLevel::Intermediate.name().to_string()),
        education: Some("Bachelor".to_string()),
        python_skill: query.current_python,
        sql_skill: query.current_sql,
        ml_skill: query.current_ml,
        communication_skill: query.current_communication,
        portfolio_projects: Some(2),
        github_commits: Some(50),
        years_experience: Some(3.0),
    };
    let insights =
        run_engine(&state, move |engine| engine.generate_career_insights(&sample)).await?;

    Ok(Json(SkillRecommendationsResponse {
        target_role: query
            .target_role
            .unwrap_or_else(|| DEFAULT_TARGET_ROLE.to_string()),
        skill_recommendations: insights.recommendations,
        current_skill_gap_score: insights.scores.skill_gap_score,
        improvement_timeline: IMPROVEMENT_TIMELINE,
        timestamp: now(),
    }))
}
