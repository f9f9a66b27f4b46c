//! Model store: owns the loaded classifier for the lifetime of the process.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use passline_core::FeatureVector;
use tracing::info;

use crate::ModelError;
use crate::logistic::LogisticModel;
use crate::model::{ModelFormat, ProbabilityModel};

/// Where the loaded model came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub format: ModelFormat,
    pub loaded_at: DateTime<Utc>,
}

impl fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, loaded {})",
            self.path.display(),
            self.format.as_str(),
            self.loaded_at.to_rfc3339()
        )
    }
}

/// The trained classifier, loaded once at startup and read-only afterwards.
///
/// Construct with [`ModelStore::load`] and hand it to a
/// [`Predictor`](crate::Predictor). There is no process-wide instance.
pub struct ModelStore {
    model: Box<dyn ProbabilityModel>,
    info: ModelInfo,
}

impl ModelStore {
    /// Load the artifact at `path`, choosing the backend from its extension.
    ///
    /// Any failure here means the service cannot serve; callers treat it as
    /// a startup error. A missing file is always an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let format = ModelFormat::from_path(path)?;
        let model: Box<dyn ProbabilityModel> = match format {
            ModelFormat::Logistic => Box::new(LogisticModel::load(path)?),
            ModelFormat::Onnx => load_onnx(path)?,
        };

        let info = ModelInfo {
            path: path.to_path_buf(),
            format,
            loaded_at: Utc::now(),
        };
        info!(path = %info.path.display(), format = format.as_str(), "loaded model");
        Ok(Self { model, info })
    }

    /// Wrap an already-built model.
    pub fn from_model(model: impl ProbabilityModel + 'static, info: ModelInfo) -> Self {
        Self {
            model: Box::new(model),
            info,
        }
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

impl ProbabilityModel for ModelStore {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        self.model.predict_proba(features)
    }
}

impl fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelStore")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> Result<Box<dyn ProbabilityModel>, ModelError> {
    Ok(Box::new(crate::onnx::OnnxModel::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> Result<Box<dyn ProbabilityModel>, ModelError> {
    Err(ModelError::UnsupportedFormat(format!(
        "{} needs the `onnx` feature",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn reference_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("models")
            .join("student_performance.json")
    }

    #[test]
    fn loads_reference_artifact() {
        let store = ModelStore::load(reference_path()).unwrap();
        assert_eq!(store.info().format, ModelFormat::Logistic);
        assert_eq!(store.info().path, reference_path());

        let p = store
            .predict_proba(&FeatureVector::new(3.0, 6.0, 80.0))
            .unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn nonexistent_path_is_fatal() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("student_performance.json");
        let err = ModelStore::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(p) if p == path));
    }

    #[test]
    fn nonexistent_path_fails_regardless_of_extension() {
        for name in ["model.onnx", "model.pkl", "model"] {
            let err = ModelStore::load(Path::new("/nonexistent").join(name)).unwrap_err();
            assert!(matches!(err, ModelError::NotFound(_)), "{name}: {err}");
        }
    }

    #[test]
    fn corrupt_artifact_fails() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{\"format\": \"passline.logistic\", \"vers").unwrap();
        let err = ModelStore::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn pickle_artifact_is_unsupported() {
        let mut file = tempfile::Builder::new().suffix(".pkl").tempfile().unwrap();
        file.write_all(b"\x80\x04\x95").unwrap();
        let err = ModelStore::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedFormat(_)));
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn onnx_needs_feature() {
        let file = tempfile::Builder::new().suffix(".onnx").tempfile().unwrap();
        let err = ModelStore::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("onnx"));
    }

    #[test]
    fn injected_model() {
        let model = LogisticModel::new([0.0, 0.0, 0.0], 0.0).unwrap();
        let info = ModelInfo {
            path: PathBuf::from("<memory>"),
            format: ModelFormat::Logistic,
            loaded_at: Utc::now(),
        };
        let store = ModelStore::from_model(model, info);
        let p = store
            .predict_proba(&FeatureVector::new(1.0, 2.0, 3.0))
            .unwrap();
        assert_eq!(p, 0.5);
        assert!(format!("{store:?}").contains("<memory>"));
    }
}
