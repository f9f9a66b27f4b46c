//! Logistic regression classifier loaded from a JSON artifact.
//!
//! The artifact is what a training script writes after fitting a
//! (optionally standardized) logistic regression:
//!
//! ```json
//! {
//!   "format": "passline.logistic",
//!   "version": 1,
//!   "features": ["study_hours", "sleep_hours", "attendance_pct"],
//!   "coefficients": [0.9, 0.35, 0.06],
//!   "intercept": -9.0,
//!   "scaler": { "mean": [4.0, 7.0, 75.0], "scale": [2.0, 1.5, 12.0] }
//! }
//! ```
//!
//! `features` is checked against [`FEATURE_NAMES`] at load time. It is the
//! contract that pins both the feature order and the attendance scale
//! (`attendance_pct`, 0..=100).

use std::path::Path;

use passline_core::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ModelError, ProbabilityModel};

/// Value of the artifact's `format` field.
pub const LOGISTIC_FORMAT: &str = "passline.logistic";

/// Newest artifact version this build reads.
pub const LOGISTIC_VERSION: u32 = 1;

/// Serialized form of a logistic model, as written by training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticArtifact {
    pub format: String,
    pub version: u32,
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Standardizer>,
}

/// Per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Just enough of an artifact to tell whether the rest can be read.
#[derive(Deserialize)]
struct Header {
    format: String,
    version: u32,
}

/// Validated logistic regression over the three input features.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    scaler: Option<([f64; FEATURE_COUNT], [f64; FEATURE_COUNT])>,
}

impl LogisticModel {
    /// Build a model directly from raw-scale coefficients.
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self, ModelError> {
        check_finite("coefficients", &coefficients)?;
        check_finite("intercept", &[intercept])?;
        Ok(Self {
            coefficients,
            intercept,
            scaler: None,
        })
    }

    /// Read and validate a JSON artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    /// Parse an artifact from bytes. The header is checked before the body so
    /// that a newer artifact reports a version error rather than a schema error.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let header: Header = serde_json::from_slice(bytes)?;
        if header.format != LOGISTIC_FORMAT {
            return Err(ModelError::IncompatibleFormat {
                found: header.format,
            });
        }
        if header.version != LOGISTIC_VERSION {
            return Err(ModelError::IncompatibleVersion {
                found: header.version,
                supported: LOGISTIC_VERSION,
            });
        }
        let artifact: LogisticArtifact = serde_json::from_slice(bytes)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: LogisticArtifact) -> Result<Self, ModelError> {
        if artifact.features.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ModelError::FeatureMismatch {
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                found: artifact.features,
            });
        }

        let coefficients = fixed("coefficients", &artifact.coefficients)?;
        let mut model = Self::new(coefficients, artifact.intercept)?;

        if let Some(scaler) = &artifact.scaler {
            let mean = fixed("scaler.mean", &scaler.mean)?;
            let scale = fixed("scaler.scale", &scaler.scale)?;
            check_finite("scaler.mean", &mean)?;
            check_finite("scaler.scale", &scale)?;
            if scale.contains(&0.0) {
                return Err(ModelError::InvalidArtifact(
                    "scaler.scale contains zero".to_string(),
                ));
            }
            model.scaler = Some((mean, scale));
        }

        Ok(model)
    }

    /// Serializable artifact for this model.
    pub fn to_artifact(&self) -> LogisticArtifact {
        LogisticArtifact {
            format: LOGISTIC_FORMAT.to_string(),
            version: LOGISTIC_VERSION,
            features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coefficients: self.coefficients.to_vec(),
            intercept: self.intercept,
            scaler: self.scaler.map(|(mean, scale)| Standardizer {
                mean: mean.to_vec(),
                scale: scale.to_vec(),
            }),
        }
    }

    /// Linear score (log-odds of passing) for a feature vector.
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        let mut x = features.as_array();
        if let Some((mean, scale)) = &self.scaler {
            for i in 0..FEATURE_COUNT {
                x[i] = (x[i] - mean[i]) / scale[i];
            }
        }
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }
}

impl ProbabilityModel for LogisticModel {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let z = self.decision_function(features);
        let p = sigmoid(z);
        debug!(z, p, "logistic inference");
        Ok(p)
    }
}

/// Logistic function, arranged so neither branch overflows.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn fixed(field: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT], ModelError> {
    values.try_into().map_err(|_| {
        ModelError::InvalidArtifact(format!(
            "{field} has {} values, expected {FEATURE_COUNT}",
            values.len()
        ))
    })
}

fn check_finite(field: &str, values: &[f64]) -> Result<(), ModelError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ModelError::InvalidArtifact(format!(
            "{field} contains a non-finite value"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const REFERENCE: &str = r#"{
        "format": "passline.logistic",
        "version": 1,
        "features": ["study_hours", "sleep_hours", "attendance_pct"],
        "coefficients": [0.9, 0.35, 0.06],
        "intercept": -9.0
    }"#;

    fn reference() -> LogisticModel {
        LogisticModel::from_slice(REFERENCE.as_bytes()).unwrap()
    }

    #[test]
    fn sigmoid_is_bounded_and_symmetric() {
        assert_eq!(sigmoid(0.0), 0.5);
        for z in [-1000.0, -30.0, -1.0, 1.0, 30.0, 1000.0] {
            let p = sigmoid(z);
            assert!((0.0..=1.0).contains(&p), "sigmoid({z}) = {p}");
            assert!((p + sigmoid(-z) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn reference_probability() {
        let model = reference();
        let p = model
            .predict_proba(&FeatureVector::new(3.0, 6.0, 80.0))
            .unwrap();
        // z = 0.9*3 + 0.35*6 + 0.06*80 - 9 = 0.6
        let expected = 1.0 / (1.0 + (-0.6f64).exp());
        assert!((p - expected).abs() < 1e-12, "got {p}, expected {expected}");
    }

    #[test]
    fn probability_in_unit_interval_over_input_grid() {
        let model = reference();
        for study in 0..=12 {
            for sleep in 0..=12 {
                for attendance in (0..=100).step_by(10) {
                    let v = FeatureVector::new(study as f64, sleep as f64, attendance as f64);
                    let p = model.predict_proba(&v).unwrap();
                    assert!((0.0..=1.0).contains(&p), "{v:?} -> {p}");
                }
            }
        }
    }

    #[test]
    fn feature_order_matters() {
        let model = reference();
        let a = model
            .predict_proba(&FeatureVector::new(3.0, 8.0, 10.0))
            .unwrap();
        let b = model
            .predict_proba(&FeatureVector::new(3.0, 10.0, 8.0))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn scaler_is_applied() {
        let json = r#"{
            "format": "passline.logistic",
            "version": 1,
            "features": ["study_hours", "sleep_hours", "attendance_pct"],
            "coefficients": [1.0, 0.0, 0.0],
            "intercept": 0.0,
            "scaler": { "mean": [4.0, 0.0, 0.0], "scale": [2.0, 1.0, 1.0] }
        }"#;
        let model = LogisticModel::from_slice(json.as_bytes()).unwrap();
        // (4 - 4) / 2 = 0 -> sigmoid(0)
        let p = model
            .predict_proba(&FeatureVector::new(4.0, 6.0, 80.0))
            .unwrap();
        assert_eq!(p, 0.5);
        assert_eq!(
            model.decision_function(&FeatureVector::new(8.0, 6.0, 80.0)),
            2.0
        );
    }

    #[test]
    fn artifact_roundtrip_preserves_predictions() {
        let model = reference();
        let json = serde_json::to_vec(&model.to_artifact()).unwrap();
        let reloaded = LogisticModel::from_slice(&json).unwrap();
        assert_eq!(reloaded, model);
    }

    #[test]
    fn rejects_foreign_format() {
        let json = REFERENCE.replace("passline.logistic", "sklearn.pickle");
        let err = LogisticModel::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::IncompatibleFormat { found } if found == "sklearn.pickle"));
    }

    #[test]
    fn rejects_newer_version_before_schema() {
        let json = r#"{ "format": "passline.logistic", "version": 2, "weights": {} }"#;
        let err = LogisticModel::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ModelError::IncompatibleVersion {
                found: 2,
                supported: 1
            }
        ));
    }

    #[test]
    fn rejects_swapped_feature_order() {
        let json = REFERENCE.replace(
            r#"["study_hours", "sleep_hours", "attendance_pct"]"#,
            r#"["study_hours", "attendance_pct", "sleep_hours"]"#,
        );
        let err = LogisticModel::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::FeatureMismatch { .. }));
    }

    #[test]
    fn rejects_fractional_attendance_contract() {
        let json = REFERENCE.replace("attendance_pct", "attendance_ratio");
        let err = LogisticModel::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::FeatureMismatch { found, .. } if found[2] == "attendance_ratio"));
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        let json = REFERENCE.replace("[0.9, 0.35, 0.06]", "[0.9, 0.35]");
        let err = LogisticModel::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(msg) if msg.contains("coefficients")));
    }

    #[test]
    fn rejects_zero_scale() {
        let mut artifact = reference().to_artifact();
        artifact.scaler = Some(Standardizer {
            mean: vec![0.0; 3],
            scale: vec![1.0, 0.0, 1.0],
        });
        assert!(matches!(
            LogisticModel::from_artifact(artifact),
            Err(ModelError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn rejects_non_finite_coefficients() {
        assert!(LogisticModel::new([f64::NAN, 0.0, 0.0], 0.0).is_err());
        assert!(LogisticModel::new([0.0, 0.0, 0.0], f64::INFINITY).is_err());
    }

    #[test]
    fn corrupt_bytes_fail_to_parse() {
        let err = LogisticModel::from_slice(b"\x80\x04\x95 not json").unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(REFERENCE.as_bytes()).unwrap();
        let model = LogisticModel::load(file.path()).unwrap();
        assert_eq!(model, reference());
    }

    #[test]
    fn load_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");
        let err = LogisticModel::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(p) if p == path));
    }
}
