//! The one capability the prediction service needs from a trained classifier.

use std::path::Path;
use std::sync::Arc;

use passline_core::FeatureVector;

use crate::ModelError;

/// A trained binary classifier, reduced to probability inference.
///
/// Implementations are immutable once built and must be safe to call from
/// several threads at once. `predict_proba` is a pure function of the model
/// and the features.
pub trait ProbabilityModel: Send + Sync {
    /// Probability of the positive ("pass") class.
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

impl<M: ProbabilityModel + ?Sized> ProbabilityModel for Box<M> {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        (**self).predict_proba(features)
    }
}

impl<M: ProbabilityModel + ?Sized> ProbabilityModel for Arc<M> {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        (**self).predict_proba(features)
    }
}

/// Artifact encodings the store can load, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// `.json` logistic regression artifact.
    Logistic,
    /// `.onnx` graph run through ONNX Runtime.
    Onnx,
}

impl ModelFormat {
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Self::Logistic),
            Some("onnx") => Ok(Self::Onnx),
            Some(other) => Err(ModelError::UnsupportedFormat(format!(
                "unknown extension .{other} ({})",
                path.display()
            ))),
            None => Err(ModelError::UnsupportedFormat(format!(
                "no file extension ({})",
                path.display()
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logistic => "logistic",
            Self::Onnx => "onnx",
        }
    }
}
