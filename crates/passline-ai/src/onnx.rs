//! ONNX Runtime backend for classifiers exported from a training pipeline.
//!
//! Expects a graph with a single float input of shape `[N, 3]` and an output
//! named `probabilities` of shape `[N, 2]` (skl2onnx with `zipmap=False`
//! produces exactly this). Column 1 is the probability of passing.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use passline_core::{FEATURE_COUNT, FeatureVector};
use tracing::{debug, info};

use crate::{ModelError, ProbabilityModel};

/// Name of the output tensor holding per-class probabilities.
pub const PROBABILITY_OUTPUT: &str = "probabilities";

/// Index of the "pass" class in the probability output.
const PASS_CLASS: usize = 1;

/// Pass/fail classifier backed by an ONNX Runtime session.
///
/// Running a session needs exclusive access, so concurrent predictions
/// serialize on the mutex.
pub struct OnnxModel {
    session: Mutex<Session>,
}

impl OnnxModel {
    /// Load a classifier from a `.onnx` file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let session = Session::builder()?.commit_from_file(path)?;

        info!(model = %path.display(), "loaded onnx classifier");
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl ProbabilityModel for OnnxModel {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let input: Vec<f32> = features.as_array().iter().map(|&v| v as f32).collect();
        let shape = [1i64, FEATURE_COUNT as i64];
        let tensor = Tensor::from_array((shape, input.into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("onnx session lock poisoned".to_string()))?;
        let outputs = session.run(ort::inputs![tensor])?;

        let probabilities = outputs.get(PROBABILITY_OUTPUT).ok_or_else(|| {
            ModelError::Inference(format!("model has no '{PROBABILITY_OUTPUT}' output"))
        })?;

        // [1, 2]: P(fail), P(pass).
        let (output_shape, data) = probabilities.try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        if dims != [1, 2] {
            return Err(ModelError::Inference(format!(
                "unexpected output shape: {dims:?}, expected [1, 2]"
            )));
        }

        let p = f64::from(data[PASS_CLASS]);
        debug!(p, "onnx inference");
        Ok(p)
    }
}
