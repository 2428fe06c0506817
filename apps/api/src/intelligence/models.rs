use serde::{Deserialize, Serialize};

/// The six scalar outputs of a prediction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMetrics {
    pub job_market_score: f64,      // 0 – 10
    pub skill_gap_score: f64,       // 0 – 10, higher = better prepared
    pub salary_prediction: f64,     // CAD, whole units
    pub job_match_probability: f64, // 0 – 100
    pub career_growth_index: f64,   // 0 – 10
    pub portfolio_strength: f64,    // 0 – 10
}

/// Validation quality reported by a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingScores {
    pub salary_predictor_r2: f64,
    pub job_matcher_accuracy: f64,
    pub career_classifier_accuracy: f64,
    pub training_samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub salary_cad: f64,
    pub job_match_probability: f64,
    pub salary_percentile: f64,
    pub career_growth_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub skill_gap_score: f64,
    pub job_market_score: f64,
    pub portfolio_strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    pub skill: String,
    pub current_level: f64,
    pub target_level: f64,
    pub gap: f64,
    pub priority: String,
    pub estimated_improvement_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPathway {
    pub current_level: String,
    pub next_level: String,
    pub timeline_months: u32,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityAnalysis {
    pub city: String,
    pub country: String,
    pub currency: String,
    pub avg_salary: f64,
    pub job_opportunities: String,
    pub remote_work_rate: f64,
    pub competition_level: String,
    pub market_context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryAnalysis {
    pub avg_salary: f64,
    pub growth_trend: String,
    pub skill_demand: Vec<String>,
    pub hiring_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub city_analysis: CityAnalysis,
    pub industry_analysis: IndustryAnalysis,
    pub recommendations: Vec<String>,
}

/// Full insights payload for one profile. Derived on every request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub predictions: Predictions,
    pub scores: Scores,
    pub recommendations: Vec<SkillRecommendation>,
    pub career_pathway: CareerPathway,
    pub market_analysis: MarketAnalysis,
}
