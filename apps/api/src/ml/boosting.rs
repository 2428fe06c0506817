//! Least-squares gradient boosting over aprender's regression trees.
//!
//! aprender ships gradient boosting only as a classifier, so the salary
//! regressor stacks `DecisionTreeRegressor` stages on the residuals here.

use aprender::metrics::r_squared;
use aprender::primitives::{Matrix, Vector};
use aprender::traits::Estimator;
use aprender::tree::DecisionTreeRegressor;

use crate::ml::ModelError;

#[derive(Debug, Clone, PartialEq)]
pub struct BoostingParams {
    pub n_estimators: usize,
    pub learning_rate: f32,
    pub max_depth: usize,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
        }
    }
}

/// Starts from the target mean; each stage fits a shallow tree to the current
/// residuals and is added scaled by the learning rate.
pub struct GradientBoostingRegressor {
    init: f32,
    learning_rate: f32,
    stages: Vec<DecisionTreeRegressor>,
}

impl GradientBoostingRegressor {
    pub fn fit(
        x: &Matrix<f32>,
        y: &Vector<f32>,
        params: &BoostingParams,
    ) -> Result<Self, ModelError> {
        let targets = y.as_slice();
        if targets.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        if x.n_rows() != targets.len() {
            return Err(ModelError::LengthMismatch {
                features: x.n_rows(),
                targets: targets.len(),
            });
        }

        let init = targets.iter().sum::<f32>() / targets.len() as f32;
        let mut current = vec![init; targets.len()];
        let mut stages = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            let residuals: Vec<f32> = targets.iter().zip(&current).map(|(t, f)| t - f).collect();
            let mut tree = DecisionTreeRegressor::new().with_max_depth(params.max_depth);
            tree.fit(x, &Vector::from_vec(residuals))
                .map_err(ModelError::backend)?;

            let update = tree.predict(x);
            for (f, u) in current.iter_mut().zip(update.as_slice()) {
                *f += params.learning_rate * u;
            }
            stages.push(tree);
        }

        Ok(Self {
            init,
            learning_rate: params.learning_rate,
            stages,
        })
    }

    pub fn predict(&self, x: &Matrix<f32>) -> Vector<f32> {
        let mut values = vec![self.init; x.n_rows()];
        for stage in &self.stages {
            let update = stage.predict(x);
            for (v, u) in values.iter_mut().zip(update.as_slice()) {
                *v += self.learning_rate * u;
            }
        }
        Vector::from_vec(values)
    }

    /// Coefficient of determination on a labelled set.
    pub fn score(&self, x: &Matrix<f32>, y: &Vector<f32>) -> f32 {
        r_squared(&self.predict(x), y)
    }
}
