use passline_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported model artifact: {0}")]
    UnsupportedFormat(String),

    #[error("artifact format {found:?} is not a passline model")]
    IncompatibleFormat { found: String },

    #[error("artifact version {found} is not supported (expected {supported})")]
    IncompatibleVersion { found: u32, supported: u32 },

    #[error("artifact features {found:?} do not match expected order {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[cfg(feature = "onnx")]
    #[error("onnx runtime error: {0}")]
    Onnx(#[from] ort::Error),
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// The model returned something that is not a probability.
    #[error("model returned {0}, expected a probability in [0, 1]")]
    ContractViolation(f64),
}
