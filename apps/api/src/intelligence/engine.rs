//! `CareerEngine`: owns the reference population and the fitted models.
//!
//! # Concurrency
//! Training is serialized by `training`. Fitted models sit behind an
//! `RwLock<Option<Arc<TrainedModels>>>`; readers clone the `Arc` and drop the
//! lock before inference, so a retrain never blocks a prediction in flight and
//! a prediction never observes a half-built model set.
//!
//! All methods are synchronous and CPU-bound. Async callers go through
//! `tokio::task::spawn_blocking`.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::intelligence::features::encode_profile;
use crate::intelligence::insights;
use crate::intelligence::models::{CareerMetrics, Insights, Predictions, Scores, TrainingScores};
use crate::intelligence::population::ReferencePopulation;
use crate::intelligence::scoring::{self, round_to};
use crate::intelligence::training::{self, ModelParams, TrainedModels};
use crate::ml::ModelError;
use crate::models::profile::{ExperienceLevel, Profile, ResolvedProfile};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("model training failed: {0}")]
    Training(ModelError),

    #[error("prediction failed: {0}")]
    Prediction(ModelError),

    #[error("engine state lock poisoned")]
    Poisoned,
}

/// Metrics for one profile plus what produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub profile: ResolvedProfile,
    pub metrics: CareerMetrics,
    pub predicted_experience_level: Option<ExperienceLevel>,
}

pub struct CareerEngine {
    population: ReferencePopulation,
    params: ModelParams,
    models: RwLock<Option<Arc<TrainedModels>>>,
    training: Mutex<()>,
}

impl CareerEngine {
    pub fn new(population: ReferencePopulation, params: ModelParams) -> Self {
        if population.is_empty() {
            warn!("Career engine created over an empty reference population; training will fail");
        } else {
            info!(
                "Career engine created over {} reference records",
                population.len()
            );
        }
        Self {
            population,
            params,
            models: RwLock::new(None),
            training: Mutex::new(()),
        }
    }

    pub fn population(&self) -> &ReferencePopulation {
        &self.population
    }

    pub fn is_trained(&self) -> bool {
        self.models.read().map(|m| m.is_some()).unwrap_or(false)
    }

    /// Fits a fresh model set and swaps it in. On failure the previously
    /// installed models (if any) stay in place.
    pub fn train_models(&self) -> Result<TrainingScores, EngineError> {
        let _guard = self.training.lock().map_err(|_| EngineError::Poisoned)?;
        let models = self.fit_and_install()?;
        Ok(models.scores().clone())
    }

    pub fn predict_career_metrics(&self, profile: &Profile) -> Result<CareerMetrics, EngineError> {
        Ok(self.assess(profile)?.metrics)
    }

    /// Metrics together with the classifier's experience level.
    pub fn assess(&self, profile: &Profile) -> Result<Assessment, EngineError> {
        let models = self.ensure_trained()?;
        let resolved = profile.resolve();

        let inference = models
            .infer(&encode_profile(&resolved))
            .map_err(EngineError::Prediction)?;

        let metrics = CareerMetrics {
            job_market_score: round_to(scoring::job_market_score(&resolved), 2),
            skill_gap_score: round_to(scoring::skill_gap_score(&resolved), 2),
            salary_prediction: inference.salary.round(),
            job_match_probability: round_to(inference.hire_probability * 100.0, 1),
            career_growth_index: round_to(scoring::career_growth_index(&resolved), 2),
            portfolio_strength: round_to(scoring::portfolio_strength(&resolved), 2),
        };

        Ok(Assessment {
            profile: resolved,
            metrics,
            predicted_experience_level: inference.experience_level,
        })
    }

    pub fn generate_career_insights(&self, profile: &Profile) -> Result<Insights, EngineError> {
        let Assessment {
            profile, metrics, ..
        } = self.assess(profile)?;

        let salary_percentile =
            insights::salary_percentile(&self.population, &profile, metrics.salary_prediction);

        Ok(Insights {
            predictions: Predictions {
                salary_cad: metrics.salary_prediction,
                job_match_probability: metrics.job_match_probability,
                salary_percentile,
                career_growth_index: metrics.career_growth_index,
            },
            scores: Scores {
                skill_gap_score: metrics.skill_gap_score,
                job_market_score: metrics.job_market_score,
                portfolio_strength: metrics.portfolio_strength,
            },
            recommendations: insights::skill_recommendations(&profile),
            career_pathway: insights::career_pathway(&profile),
            market_analysis: insights::market_analysis(&self.population, &profile),
        })
    }

    fn current_models(&self) -> Result<Option<Arc<TrainedModels>>, EngineError> {
        let slot = self.models.read().map_err(|_| EngineError::Poisoned)?;
        Ok(slot.clone())
    }

    /// Check, lock, re-check, train. Concurrent first callers train once.
    fn ensure_trained(&self) -> Result<Arc<TrainedModels>, EngineError> {
        if let Some(models) = self.current_models()? {
            return Ok(models);
        }

        let _guard = self.training.lock().map_err(|_| EngineError::Poisoned)?;
        if let Some(models) = self.current_models()? {
            return Ok(models);
        }

        info!("Models not trained yet; training on first use");
        self.fit_and_install()
    }

    /// Caller must hold `training`.
    fn fit_and_install(&self) -> Result<Arc<TrainedModels>, EngineError> {
        info!(
            "Training career models on {} records",
            self.population.len()
        );
        let started = Instant::now();

        let models = training::train(&self.population, &self.params).map_err(|e| {
            error!("Model training failed: {e}");
            EngineError::Training(e)
        })?;
        let models = Arc::new(models);

        *self.models.write().map_err(|_| EngineError::Poisoned)? = Some(Arc::clone(&models));

        let scores = models.scores();
        info!(
            "Models trained in {:?}: salary r2 {}, job match acc {}, career acc {}",
            started.elapsed(),
            scores.salary_predictor_r2,
            scores.job_matcher_accuracy,
            scores.career_classifier_accuracy
        );
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::population::PopulationSpec;

    fn engine(size: usize) -> CareerEngine {
        let population = ReferencePopulation::generate(PopulationSpec {
            size,
            ..Default::default()
        })
        .unwrap();
        CareerEngine::new(population, ModelParams::lightweight())
    }

    fn toronto_tech() -> Profile {
        Profile {
            city: Some("Toronto".to_string()),
            industry: Some("Tech".to_string()),
            python_skill: Some(7.0),
            sql_skill: Some(6.5),
            ml_skill: Some(5.5),
            communication_skill: Some(7.0),
            portfolio_projects: Some(3),
            years_experience: Some(3.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_prediction_trains_lazily() {
        let engine = engine(400);
        assert!(!engine.is_trained());
        engine.predict_career_metrics(&Profile::default()).unwrap();
        assert!(engine.is_trained());
    }

    #[test]
    fn test_toronto_tech_scenario() {
        let engine = engine(400);
        let insights = engine.generate_career_insights(&toronto_tech()).unwrap();

        assert_eq!(insights.scores.skill_gap_score, 9.25);
        assert!(insights.recommendations.is_empty());
        assert_eq!(insights.scores.job_market_score, 9.0);
        assert_eq!(insights.career_pathway.next_level, "Intermediate");
        assert_eq!(insights.career_pathway.timeline_months, 24);
    }

    #[test]
    fn test_metric_bounds() {
        let engine = engine(400);
        let profiles = [
            Profile::default(),
            toronto_tech(),
            Profile {
                city: Some("San Francisco".to_string()),
                experience_level: Some("Director".to_string()),
                education: Some("PhD".to_string()),
                python_skill: Some(10.0),
                sql_skill: Some(10.0),
                ml_skill: Some(10.0),
                communication_skill: Some(10.0),
                portfolio_projects: Some(40),
                github_commits: Some(9000),
                years_experience: Some(25.0),
                ..Default::default()
            },
            Profile {
                city: Some("Nowhere".to_string()),
                industry: Some("Unknown".to_string()),
                python_skill: Some(-4.0),
                sql_skill: Some(0.0),
                ml_skill: Some(0.0),
                communication_skill: Some(0.0),
                portfolio_projects: Some(0),
                github_commits: Some(0),
                years_experience: Some(0.0),
                ..Default::default()
            },
        ];

        for profile in &profiles {
            let insights = engine.generate_career_insights(profile).unwrap();
            for score in [
                insights.scores.skill_gap_score,
                insights.scores.job_market_score,
                insights.scores.portfolio_strength,
                insights.predictions.career_growth_index,
            ] {
                assert!((0.0..=10.0).contains(&score), "score {score} out of range");
            }
            assert!((0.0..=100.0).contains(&insights.predictions.job_match_probability));
            assert!((0.0..=100.0).contains(&insights.predictions.salary_percentile));
        }
    }

    #[test]
    fn test_default_profile_is_deterministic() {
        let engine = engine(400);
        let a = engine.predict_career_metrics(&Profile::default()).unwrap();
        let b = engine.predict_career_metrics(&Profile::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.skill_gap_score, 7.5);
        assert_eq!(a.portfolio_strength, 3.75);
        assert_eq!(a.career_growth_index, 4.2);
    }

    #[test]
    fn test_retrain_reproduces_scores_and_predictions() {
        let engine = engine(400);
        let first = engine.train_models().unwrap();
        let before = engine.assess(&Profile::default()).unwrap();

        let second = engine.train_models().unwrap();
        let after = engine.assess(&Profile::default()).unwrap();

        assert_eq!(first, second);
        assert_eq!(before, after);
        assert_eq!(first.training_samples, 400);
    }

    #[test]
    fn test_training_failure_propagates() {
        let engine = CareerEngine::new(
            ReferencePopulation::from_records(Vec::new()),
            ModelParams::lightweight(),
        );
        assert!(matches!(
            engine.train_models(),
            Err(EngineError::Training(ModelError::EmptyDataset))
        ));
        assert!(!engine.is_trained());
        assert!(matches!(
            engine.predict_career_metrics(&Profile::default()),
            Err(EngineError::Training(_))
        ));
    }

    #[test]
    fn test_concurrent_first_use_agrees() {
        let engine = Arc::new(engine(300));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.assess(&Profile::default()).unwrap())
            })
            .collect();

        let results: Vec<Assessment> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_assessment_reports_experience_level() {
        let engine = engine(400);
        let assessment = engine.assess(&Profile::default()).unwrap();
        assert!(assessment.predicted_experience_level.is_some());
        assert_eq!(assessment.profile.city, "Toronto");
    }
}
