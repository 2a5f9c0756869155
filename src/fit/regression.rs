//! The regression engine: observation store, cross registry, fit and predict.
//!
//! Typical use:
//!
//! ```
//! use regress::domain::Observation;
//! use regress::fit::Regression;
//! use regress::math::FeatureCross;
//!
//! let mut reg = Regression::new();
//! reg.train([
//!     Observation::new(6.0, [2.0]),
//!     Observation::new(20.0, [4.0]),
//!     Observation::new(30.0, [5.0]),
//!     Observation::new(72.0, [8.0]),
//! ]);
//! reg.add_cross(FeatureCross::power(0, 2.0));
//! reg.fit().unwrap();
//!
//! let y = reg.predict(&[6.0]).unwrap();
//! assert!((y - 42.0).abs() < 1e-9);
//! ```
//!
//! Every fit re-solves from scratch over the whole store. Cross outputs are
//! computed once per observation and cached on the stored record; the
//! prediction path recomputes them from the same registry, so fitted columns
//! and predicted features always line up.

use crate::domain::{FitStatistics, FittedModel, Observation};
use crate::error::RegressionError;
use crate::fit::design::DesignMatrix;
use crate::fit::stats::compute_statistics;
use crate::math::{FeatureCross, solve_least_squares};
use crate::models::{coefficient_at, predict};

/// A fit needs more than this many observations in the store.
pub const MIN_TRAINING_OBSERVATIONS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct Regression {
    observations: Vec<Observation>,
    crosses: Vec<FeatureCross>,
    fitted: Option<FittedModel>,
}

impl Regression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append observations to the store, preserving order.
    ///
    /// Training after a fit does not refit; call [`Regression::fit`] again.
    pub fn train(&mut self, observations: impl IntoIterator<Item = Observation>) {
        self.observations.extend(observations);
    }

    /// Register a feature cross. Crosses are applied in registration order.
    pub fn add_cross(&mut self, cross: FeatureCross) {
        self.crosses.push(cross);
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn crosses(&self) -> &[FeatureCross] {
        &self.crosses
    }

    /// Whether the store holds enough observations to attempt a fit.
    pub fn is_fit_eligible(&self) -> bool {
        self.observations.len() > MIN_TRAINING_OBSERVATIONS
    }

    /// Whether a fit has succeeded.
    pub fn is_ready(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn fitted(&self) -> Option<&FittedModel> {
        self.fitted.as_ref()
    }

    pub fn statistics(&self) -> Option<&FitStatistics> {
        self.fitted.as_ref().map(|m| &m.statistics)
    }

    /// Coefficient for term `i` (0 = bias). Returns `0.0` before a fit or past
    /// the fitted terms.
    pub fn coeff(&self, i: usize) -> f64 {
        coefficient_at(self.coefficients(), i)
    }

    /// All fitted coefficients, bias first. Empty before a fit.
    pub fn coefficients(&self) -> &[f64] {
        match &self.fitted {
            Some(model) => &model.coefficients,
            None => &[],
        }
    }

    /// Fit the model over the current store and cross registry.
    ///
    /// On success the fitted model, and every observation's `predicted` and
    /// `residual`, are replaced. On failure they keep their previous values;
    /// only cross outputs already cached on observations persist.
    ///
    /// Cached cross values are never recomputed. A cross registered after
    /// observations were cached makes the fit fail with
    /// [`RegressionError::CrossCountMismatch`].
    pub fn fit(&mut self) -> Result<&FittedModel, RegressionError> {
        if !self.is_fit_eligible() {
            return Err(RegressionError::InsufficientData {
                observations: self.observations.len(),
                required: MIN_TRAINING_OBSERVATIONS + 1,
            });
        }

        self.apply_crosses()?;
        self.check_cached_crosses()?;

        let design = DesignMatrix::build(&self.observations)?;
        let coefficients: Vec<f64> = solve_least_squares(&design.x, &design.y)?.iter().copied().collect();

        let predictions = self
            .observations
            .iter()
            .map(|obs| self.predict_with(&coefficients, &obs.variables))
            .collect::<Result<Vec<_>, _>>()?;

        for (obs, predicted) in self.observations.iter_mut().zip(predictions) {
            obs.predicted = predicted;
            obs.residual = predicted - obs.observed;
        }

        let statistics = compute_statistics(&self.observations);
        if statistics.r_squared.is_nan() {
            tracing::warn!("observed values have zero variance; R² is undefined");
        }
        tracing::info!(
            observations = self.observations.len(),
            terms = coefficients.len(),
            r_squared = statistics.r_squared,
            "regression fit complete"
        );

        Ok(&*self.fitted.insert(FittedModel {
            coefficients,
            variable_count: design.variable_count,
            cross_count: design.cross_count,
            observations: self.observations.len(),
            statistics,
        }))
    }

    /// Predict the observed value for a raw variable vector.
    ///
    /// Registered crosses are appended to `variables` before evaluation.
    /// Features beyond the fitted terms contribute nothing.
    pub fn predict(&self, variables: &[f64]) -> Result<f64, RegressionError> {
        let model = self.fitted.as_ref().ok_or(RegressionError::NotFitted)?;
        self.predict_with(&model.coefficients, variables)
    }

    fn predict_with(&self, coefficients: &[f64], variables: &[f64]) -> Result<f64, RegressionError> {
        let features = self.extend_features(variables)?;
        Ok(predict(coefficients, &features))
    }

    /// `variables` followed by every cross output, in registration order.
    fn extend_features(&self, variables: &[f64]) -> Result<Vec<f64>, RegressionError> {
        let mut features = Vec::with_capacity(variables.len() + self.cross_arity());
        features.extend_from_slice(variables);
        for cross in &self.crosses {
            cross.calculate_into(variables, &mut features)?;
        }
        Ok(features)
    }

    /// Total number of values the registered crosses append to a variable vector.
    fn cross_arity(&self) -> usize {
        self.crosses.iter().map(FeatureCross::arity).sum()
    }

    /// Every stored observation must carry one cached value per registered
    /// cross output, or the fitted columns would differ from what `predict` builds.
    fn check_cached_crosses(&self) -> Result<(), RegressionError> {
        let expected = self.cross_arity();
        match self.observations.iter().enumerate().find(|(_, o)| o.crosses.len() != expected) {
            Some((row, obs)) => Err(RegressionError::CrossCountMismatch {
                row,
                expected,
                found: obs.crosses.len(),
            }),
            None => Ok(()),
        }
    }

    /// Compute and cache cross outputs on every stored observation that has none yet.
    fn apply_crosses(&mut self) -> Result<(), RegressionError> {
        if self.crosses.is_empty() {
            return Ok(());
        }

        let mut cached = 0usize;
        for obs in self.observations.iter_mut().filter(|o| o.crosses.is_empty()) {
            let mut values = Vec::new();
            for cross in &self.crosses {
                cross.calculate_into(&obs.variables, &mut values)?;
            }
            obs.crosses = values;
            cached += 1;
        }

        tracing::debug!(cached, crosses = self.crosses.len(), "applied feature crosses");
        Ok(())
    }
}
