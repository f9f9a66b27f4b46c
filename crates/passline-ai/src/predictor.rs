//! Prediction service: raw inputs in, pass/fail verdict out.
//!
//! Validates the three scalars against [`InputBounds`] under an
//! [`InputPolicy`], builds the fixed-order [`FeatureVector`], asks the model
//! for the probability of passing and thresholds it at
//! [`PASS_THRESHOLD`](passline_core::PASS_THRESHOLD).

use passline_core::{
    Feature, FeatureVector, InputBounds, InputPolicy, PredictionResult, ValidationError,
};
use tracing::{debug, warn};

use crate::{PredictError, ProbabilityModel};

/// Stateless request/response front end over an owned model.
///
/// Holds no per-request state, so one instance can serve any number of
/// threads when `M` is `Sync` (every [`ProbabilityModel`] is).
#[derive(Debug)]
pub struct Predictor<M> {
    model: M,
    bounds: InputBounds,
    policy: InputPolicy,
}

impl<M: ProbabilityModel> Predictor<M> {
    /// Default form bounds, out-of-range input rejected.
    pub fn new(model: M) -> Self {
        Self {
            model,
            bounds: InputBounds::DEFAULT,
            policy: InputPolicy::Reject,
        }
    }

    pub fn with_policy(mut self, policy: InputPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the form bounds. Inverted or non-finite ranges are refused.
    pub fn with_bounds(mut self, bounds: InputBounds) -> Result<Self, ValidationError> {
        bounds.check()?;
        self.bounds = bounds;
        Ok(self)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Predict from the three raw inputs, in training order.
    pub fn predict(
        &self,
        study_hours: f64,
        sleep_hours: f64,
        attendance_pct: f64,
    ) -> Result<PredictionResult, PredictError> {
        self.predict_features(&FeatureVector::new(
            study_hours,
            sleep_hours,
            attendance_pct,
        ))
    }

    pub fn predict_features(
        &self,
        features: &FeatureVector,
    ) -> Result<PredictionResult, PredictError> {
        self.assess(features).map(|(_, result)| result)
    }

    /// Like [`predict_features`](Self::predict_features), but also returns
    /// the vector the model was actually given (clamped under
    /// [`InputPolicy::Clamp`]).
    pub fn assess(
        &self,
        features: &FeatureVector,
    ) -> Result<(FeatureVector, PredictionResult), PredictError> {
        let checked = features.validated(&self.bounds, self.policy)?;
        if checked != *features {
            for feature in Feature::ALL {
                let (from, to) = (features.get(feature), checked.get(feature));
                if from != to {
                    warn!(feature = feature.as_str(), from, to, "clamped input");
                }
            }
        }

        let p = self.model.predict_proba(&checked)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(PredictError::ContractViolation(p));
        }

        let result = PredictionResult::from_probability(p);
        debug!(
            study_hours = checked.study_hours,
            sleep_hours = checked.sleep_hours,
            attendance_pct = checked.attendance_pct,
            probability_pass = p,
            label = result.label.as_str(),
            "prediction"
        );
        Ok((checked, result))
    }
}
