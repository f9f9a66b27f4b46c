//! Vertical card display for predictions and model metadata.
//!
//! Renders to a `String` so the same card serves `predict`, the interactive
//! demo, and tests.

use passline_ai::ModelInfo;
use passline_core::{Feature, FeatureVector, PredictionResult};

const LABEL_WIDTH: usize = 16;

/// Form labels, in training order.
pub fn feature_label(feature: Feature) -> &'static str {
    match feature {
        Feature::StudyHours => "Study Hours",
        Feature::SleepHours => "Sleep Hours",
        Feature::AttendancePct => "Attendance (%)",
    }
}

/// Inputs followed by the verdict and its two-decimal confidence.
pub fn render_card(features: &FeatureVector, result: &PredictionResult) -> String {
    let mut out = String::new();
    out.push_str("=== Prediction ===\n");

    out.push_str("Inputs\n");
    for feature in Feature::ALL {
        row(&mut out, feature_label(feature), features.get(feature));
    }

    out.push_str("Result\n");
    row(&mut out, "Prediction", result.label);
    row(&mut out, "Confidence", result.confidence());
    out
}

pub fn render_info(info: &ModelInfo) -> String {
    let mut out = String::new();
    out.push_str("=== Model ===\n");
    row(&mut out, "Path", info.path.display());
    row(&mut out, "Format", info.format.as_str());
    row(&mut out, "Loaded", info.loaded_at.to_rfc3339());
    out
}

fn row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("  {label:<LABEL_WIDTH$} {value}\n"));
}
