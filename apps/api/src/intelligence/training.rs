//! Model trainer: fits the scaler and the three estimators on the reference population.

use aprender::model_selection::train_test_split;
use aprender::preprocessing::StandardScaler;
use aprender::primitives::{Matrix, Vector};
use aprender::traits::Transformer;
use aprender::tree::RandomForestClassifier;
use tracing::debug;

use crate::intelligence::features::{encode_record, FEATURE_COUNT, FEATURE_NAMES};
use crate::intelligence::models::TrainingScores;
use crate::intelligence::population::ReferencePopulation;
use crate::ml::{
    check_classes, row_matrix, to_matrix, to_vector, BoostingParams, GradientBoostingRegressor,
    ModelError,
};
use crate::models::profile::ExperienceLevel;

#[derive(Debug, Clone, PartialEq)]
pub struct ForestParams {
    pub n_estimators: usize,
    /// `None` grows every tree until its leaves are pure.
    pub max_depth: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn fit(&self, x: &Matrix<f32>, labels: &[usize]) -> Result<RandomForestClassifier, ModelError> {
        check_classes(labels)?;
        let mut forest = RandomForestClassifier::new(self.n_estimators).with_random_state(self.seed);
        if let Some(depth) = self.max_depth {
            forest = forest.with_max_depth(depth);
        }
        forest.fit(x, labels).map_err(ModelError::backend)?;
        Ok(forest)
    }
}

/// Hyperparameters for a full training run.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub salary: BoostingParams,
    pub job_match: ForestParams,
    pub career_level: ForestParams,
    pub test_fraction: f32,
    pub split_seed: u64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            salary: BoostingParams::default(),
            job_match: ForestParams::default(),
            career_level: ForestParams::default(),
            test_fraction: 0.2,
            split_seed: 42,
        }
    }
}

#[cfg(test)]
impl ModelParams {
    /// Small ensembles for fast tests. Same seeds and split as the default.
    pub fn lightweight() -> Self {
        let forest = ForestParams {
            n_estimators: 12,
            max_depth: Some(10),
            ..Default::default()
        };
        Self {
            salary: BoostingParams {
                n_estimators: 40,
                ..Default::default()
            },
            job_match: forest.clone(),
            career_level: forest,
            ..Default::default()
        }
    }
}

/// Raw outputs of the three models for one encoded profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub salary: f64,
    /// Probability of the positive ("hired") class, 0–1.
    pub hire_probability: f64,
    pub experience_level: Option<ExperienceLevel>,
}

/// A complete, immutable set of fitted models.
pub struct TrainedModels {
    scaler: StandardScaler,
    salary: GradientBoostingRegressor,
    job_match: RandomForestClassifier,
    career_level: RandomForestClassifier,
    scores: TrainingScores,
}

impl TrainedModels {
    pub fn scores(&self) -> &TrainingScores {
        &self.scores
    }

    pub fn infer(&self, features: &[f64]) -> Result<Inference, ModelError> {
        let row = row_matrix(features, FEATURE_COUNT)?;
        let scaled = self.scaler.transform(&row).map_err(ModelError::backend)?;

        let salary = self
            .salary
            .predict(&scaled)
            .as_slice()
            .first()
            .copied()
            .unwrap_or(0.0);

        let proba = self.job_match.predict_proba(&scaled);
        let hire_probability = if proba.n_cols() > 1 {
            proba.get(0, 1)
        } else {
            0.0
        };

        let experience_level = self
            .career_level
            .predict(&scaled)
            .first()
            .copied()
            .and_then(ExperienceLevel::from_code);

        Ok(Inference {
            salary: f64::from(salary),
            hire_probability: f64::from(hire_probability),
            experience_level,
        })
    }
}

/// Fits every model against the population. Any failure aborts the whole run.
pub fn train(
    population: &ReferencePopulation,
    params: &ModelParams,
) -> Result<TrainedModels, ModelError> {
    let records = population.records();
    let raw: Vec<Vec<f64>> = records.iter().map(encode_record).collect();
    debug!("Feature layout ({FEATURE_COUNT}): {}", FEATURE_NAMES.join(", "));
    let x = to_matrix(&raw)?;

    let salaries: Vec<f64> = records.iter().map(|r| r.salary_cad).collect();
    let hired: Vec<usize> = records.iter().map(|r| usize::from(r.hired)).collect();
    let levels: Vec<usize> = records.iter().map(|r| r.experience_level.code()).collect();
    check_classes(&hired)?;
    let n_levels = check_classes(&levels)?;

    let mut scaler = StandardScaler::new();
    scaler.fit(&x).map_err(ModelError::backend)?;
    let scaled = scaler.transform(&x).map_err(ModelError::backend)?;

    // Row indices ride along as the split target so all three models share one partition.
    let row_ids = Vector::from_vec((0..records.len()).map(|i| i as f32).collect());
    let (x_train, x_test, train_ids, test_ids) =
        train_test_split(&scaled, &row_ids, params.test_fraction, Some(params.split_seed))
            .map_err(ModelError::backend)?;
    let train_rows = indices(&train_ids);
    let test_rows = indices(&test_ids);

    let salary = GradientBoostingRegressor::fit(
        &x_train,
        &to_vector(&select(&salaries, &train_rows)),
        &params.salary,
    )?;
    let salary_r2 = salary.score(&x_test, &to_vector(&select(&salaries, &test_rows)));

    let job_match = params.job_match.fit(&x_train, &select(&hired, &train_rows))?;
    let job_match_accuracy = job_match.score(&x_test, &select(&hired, &test_rows));

    let career_level = params
        .career_level
        .fit(&x_train, &select(&levels, &train_rows))?;
    debug!("Career classifier fitted over {n_levels} experience levels");
    let career_accuracy = career_level.score(&x_test, &select(&levels, &test_rows));

    let scores = TrainingScores {
        salary_predictor_r2: round3(salary_r2),
        job_matcher_accuracy: round3(job_match_accuracy),
        career_classifier_accuracy: round3(career_accuracy),
        training_samples: records.len(),
    };

    Ok(TrainedModels {
        scaler,
        salary,
        job_match,
        career_level,
        scores,
    })
}

fn indices(ids: &Vector<f32>) -> Vec<usize> {
    ids.as_slice().iter().map(|&i| i as usize).collect()
}

fn select<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i].clone()).collect()
}

fn round3(value: f32) -> f64 {
    (f64::from(value) * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::features::encode_profile;
    use crate::intelligence::population::{PopulationSpec, ReferencePopulation};
    use crate::models::profile::Profile;

    fn population(size: usize) -> ReferencePopulation {
        ReferencePopulation::generate(PopulationSpec {
            size,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_training_reports_scores() {
        let pop = population(600);
        let models = train(&pop, &ModelParams::lightweight()).unwrap();
        let scores = models.scores();

        assert_eq!(scores.training_samples, 600);
        // Salary is driven by the categorical multipliers, so the regressor must explain most variance.
        assert!(scores.salary_predictor_r2 > 0.5, "r2 = {}", scores.salary_predictor_r2);
        assert!((0.0..=1.0).contains(&scores.job_matcher_accuracy));
        assert!((0.0..=1.0).contains(&scores.career_classifier_accuracy));
    }

    #[test]
    fn test_retraining_is_deterministic() {
        let pop = population(400);
        let params = ModelParams::lightweight();
        let a = train(&pop, &params).unwrap();
        let b = train(&pop, &params).unwrap();
        assert_eq!(a.scores(), b.scores());

        let features = encode_profile(&Profile::default().resolve());
        assert_eq!(a.infer(&features).unwrap(), b.infer(&features).unwrap());
    }

    #[test]
    fn test_inference_outputs_in_range() {
        let pop = population(400);
        let models = train(&pop, &ModelParams::lightweight()).unwrap();
        let features = encode_profile(&Profile::default().resolve());
        let inference = models.infer(&features).unwrap();

        assert!((0.0..=1.0).contains(&inference.hire_probability));
        assert!(inference.salary > 0.0);
        assert!(inference.experience_level.is_some());
    }

    #[test]
    fn test_single_class_target_aborts_training() {
        let mut records = population(50).records().to_vec();
        records.iter_mut().for_each(|r| r.hired = true);
        let pop = ReferencePopulation::from_records(records);

        let err = train(&pop, &ModelParams::lightweight()).err();
        assert_eq!(err, Some(ModelError::SingleClass(1)));
    }

    #[test]
    fn test_forest_rejects_single_class_before_fitting() {
        let x = crate::ml::to_matrix(&[vec![0.0], vec![1.0], vec![2.0]]).unwrap();
        let err = ForestParams::default().fit(&x, &[2, 2, 2]).err();
        assert_eq!(err, Some(ModelError::SingleClass(1)));
    }

    #[test]
    fn test_empty_population_aborts_training() {
        let pop = ReferencePopulation::from_records(Vec::new());
        assert_eq!(
            train(&pop, &ModelParams::lightweight()).err(),
            Some(ModelError::EmptyDataset)
        );
    }

    #[test]
    fn test_wrong_width_rejected_at_inference() {
        let models = train(&population(200), &ModelParams::lightweight()).unwrap();
        assert!(matches!(
            models.infer(&[1.0, 2.0]),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }
}
