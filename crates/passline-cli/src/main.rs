use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use passline_ai::{ModelStore, Predictor};
use passline_core::{FeatureVector, InputPolicy};

mod demo;
mod display;

const DEFAULT_MODEL: &str = "models/student_performance.json";

/// Predict whether a student passes from study hours, sleep hours and attendance.
#[derive(Parser, Debug)]
#[command(name = "passline", version)]
struct Cli {
    /// Trained model artifact (.json, or .onnx with the `onnx` feature).
    #[arg(long, global = true, env = "PASSLINE_MODEL", default_value = DEFAULT_MODEL)]
    model: PathBuf,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one prediction and print the result.
    Predict {
        /// Study hours per day (0-12).
        #[arg(long, allow_negative_numbers = true)]
        study_hours: f64,
        /// Sleep hours per night (0-12).
        #[arg(long, allow_negative_numbers = true)]
        sleep_hours: f64,
        /// Class attendance percentage (0-100).
        #[arg(long, allow_negative_numbers = true)]
        attendance: f64,
        /// Clamp out-of-range values instead of rejecting them.
        #[arg(long)]
        clamp: bool,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show where the model was loaded from.
    Info,
    /// Interactive form: enter values, get a prediction, repeat.
    Demo {
        /// Clamp out-of-range values instead of rejecting them.
        #[arg(long)]
        clamp: bool,
    },
}

fn policy(clamp: bool) -> InputPolicy {
    if clamp {
        InputPolicy::Clamp
    } else {
        InputPolicy::Reject
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("passline v{}", env!("CARGO_PKG_VERSION"));

    let store = ModelStore::load(&cli.model)
        .with_context(|| format!("loading model from {}", cli.model.display()))?;

    match cli.command {
        Command::Predict {
            study_hours,
            sleep_hours,
            attendance,
            clamp,
            json,
        } => {
            let predictor = Predictor::new(store).with_policy(policy(clamp));
            let features = FeatureVector::new(study_hours, sleep_hours, attendance);
            let (seen, result) = predictor
                .assess(&features)
                .context("prediction failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", display::render_card(&seen, &result));
            }
        }
        Command::Info => {
            print!("{}", display::render_info(store.info()));
        }
        Command::Demo { clamp } => {
            let predictor = Predictor::new(store).with_policy(policy(clamp));
            let stdin = std::io::stdin();
            let shown = demo::run(&predictor, stdin.lock(), std::io::stdout())?;
            tracing::info!(shown, "demo finished");
        }
    }

    Ok(())
}
