//! Model store and prediction service: load a trained pass/fail classifier
//! once, then turn raw inputs into thresholded predictions.

mod error;
pub mod logistic;
pub mod model;
pub mod predictor;
pub mod store;

#[cfg(feature = "onnx")]
pub mod onnx;

pub use error::{ModelError, PredictError};
pub use logistic::LogisticModel;
pub use model::{ModelFormat, ProbabilityModel};
pub use predictor::Predictor;
pub use store::{ModelInfo, ModelStore};

#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
