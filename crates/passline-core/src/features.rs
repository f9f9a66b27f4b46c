//! Fixed-order feature vectors and the input bounds they are checked against.
//!
//! The classifier was trained on `[study_hours, sleep_hours, attendance_pct]`
//! in exactly that order. Position encodes meaning: there is no lookup by
//! name at inference time, so [`FeatureVector::as_array`] is the single place
//! that decides the order handed to a model.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of features every model consumes.
pub const FEATURE_COUNT: usize = 3;

/// Feature names in training order. Model artifacts declare this list.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["study_hours", "sleep_hours", "attendance_pct"];

/// One input feature, in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    StudyHours,
    SleepHours,
    /// Attendance on the 0..=100 percentage scale, not a fraction.
    AttendancePct,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] =
        [Feature::StudyHours, Feature::SleepHours, Feature::AttendancePct];

    pub fn as_str(&self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    /// Position of this feature inside a [`FeatureVector`].
    pub fn index(&self) -> usize {
        match self {
            Self::StudyHours => 0,
            Self::SleepHours => 1,
            Self::AttendancePct => 2,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered model input: study hours per day, sleep hours per night, attendance %.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub attendance_pct: f64,
}

impl FeatureVector {
    pub fn new(study_hours: f64, sleep_hours: f64, attendance_pct: f64) -> Self {
        Self {
            study_hours,
            sleep_hours,
            attendance_pct,
        }
    }

    /// Values in training order.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [self.study_hours, self.sleep_hours, self.attendance_pct]
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.as_array()[feature.index()]
    }

    /// Check (or clamp) every value against `bounds`, in training order.
    ///
    /// Returns the first failure. Non-finite values are rejected under both
    /// policies since there is no nearest bound for NaN.
    pub fn validated(
        &self,
        bounds: &InputBounds,
        policy: InputPolicy,
    ) -> Result<Self, ValidationError> {
        let mut values = self.as_array();
        for feature in Feature::ALL {
            let i = feature.index();
            values[i] = bounds.range(feature).resolve(feature, values[i], policy)?;
        }
        Ok(Self::new(values[0], values[1], values[2]))
    }
}

/// Inclusive `[min, max]` range for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Finite bounds with `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    fn resolve(
        &self,
        feature: Feature,
        value: f64,
        policy: InputPolicy,
    ) -> Result<f64, ValidationError> {
        if !self.is_valid() {
            return Err(ValidationError::InvalidRange {
                feature,
                min: self.min,
                max: self.max,
            });
        }
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { feature, value });
        }
        if self.contains(value) {
            return Ok(value);
        }
        match policy {
            InputPolicy::Reject => Err(ValidationError::OutOfRange {
                feature,
                value,
                min: self.min,
                max: self.max,
            }),
            InputPolicy::Clamp => Ok(value.clamp(self.min, self.max)),
        }
    }
}

/// Accepted input ranges. Defaults are the bounds of the input form;
/// the model itself does not enforce them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    pub study_hours: Range,
    pub sleep_hours: Range,
    pub attendance_pct: Range,
}

impl InputBounds {
    pub const DEFAULT: Self = Self {
        study_hours: Range::new(0.0, 12.0),
        sleep_hours: Range::new(0.0, 12.0),
        attendance_pct: Range::new(0.0, 100.0),
    };

    /// First feature whose range is unusable, if any.
    pub fn check(&self) -> Result<(), ValidationError> {
        for feature in Feature::ALL {
            let range = self.range(feature);
            if !range.is_valid() {
                return Err(ValidationError::InvalidRange {
                    feature,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    pub fn range(&self, feature: Feature) -> Range {
        match feature {
            Feature::StudyHours => self.study_hours,
            Feature::SleepHours => self.sleep_hours,
            Feature::AttendancePct => self.attendance_pct,
        }
    }
}

impl Default for InputBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What to do with a finite value outside its [`Range`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Fail with [`ValidationError::OutOfRange`].
    #[default]
    Reject,
    /// Move the value to the nearest bound.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("{feature} must be a finite number, got {value}")]
    NotFinite { feature: Feature, value: f64 },

    #[error("{feature} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        feature: Feature,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("bounds for {feature} are unusable: [{min}, {max}]")]
    InvalidRange { feature: Feature, min: f64, max: f64 },
}

impl ValidationError {
    pub fn feature(&self) -> Feature {
        match self {
            Self::NotFinite { feature, .. }
            | Self::OutOfRange { feature, .. }
            | Self::InvalidRange { feature, .. } => *feature,
        }
    }
}
