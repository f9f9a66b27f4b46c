pub mod features;
pub mod prediction;

pub use features::{
    FEATURE_COUNT, FEATURE_NAMES, Feature, FeatureVector, InputBounds, InputPolicy, Range,
    ValidationError,
};
pub use prediction::{Label, PASS_THRESHOLD, PredictionResult};
