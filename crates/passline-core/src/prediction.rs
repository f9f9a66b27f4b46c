//! Pass/fail verdicts derived from a probability of passing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Probabilities at or above this value are labelled [`Label::Pass`].
pub const PASS_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Pass,
    Fail,
}

impl Label {
    /// Threshold is inclusive on the pass side: exactly 0.5 passes.
    pub fn from_probability(probability_pass: f64) -> Self {
        if probability_pass >= PASS_THRESHOLD {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one prediction.
///
/// The label carries no state of its own; it is always
/// `Label::from_probability(probability_pass)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability_pass: f64,
    pub label: Label,
}

impl PredictionResult {
    pub fn from_probability(probability_pass: f64) -> Self {
        Self {
            probability_pass,
            label: Label::from_probability(probability_pass),
        }
    }

    /// Probability formatted for display, two decimal places.
    pub fn confidence(&self) -> String {
        format!("{:.2}", self.probability_pass)
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.label, self.probability_pass)
    }
}
