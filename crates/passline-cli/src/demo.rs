//! Interactive form: prompt for the three inputs, print the prediction card,
//! repeat until `q` or end of input.

use std::io::{BufRead, Write};

use passline_ai::{PredictError, Predictor, ProbabilityModel};
use passline_core::{FEATURE_COUNT, Feature, FeatureVector};

use crate::display;

/// Value used when a prompt is answered with an empty line.
pub fn form_default(feature: Feature) -> f64 {
    match feature {
        Feature::StudyHours => 3.0,
        Feature::SleepHours => 6.0,
        Feature::AttendancePct => 80.0,
    }
}

/// Run the form loop. Returns the number of predictions shown.
pub fn run<M: ProbabilityModel>(
    predictor: &Predictor<M>,
    input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<usize> {
    writeln!(out, "Will this student pass? Enter values, blank for default, q to quit.")?;

    let mut lines = input.lines();
    let mut shown = 0;

    'form: loop {
        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            match ask(feature, &mut lines, &mut out)? {
                Some(v) => values[feature.index()] = v,
                None => break 'form,
            }
        }

        let features = FeatureVector::new(values[0], values[1], values[2]);
        match predictor.assess(&features) {
            Ok((seen, result)) => {
                write!(out, "{}", display::render_card(&seen, &result))?;
                shown += 1;
            }
            // Bad input is the user's to fix; anything else is fatal.
            Err(PredictError::Validation(e)) => writeln!(out, "  {e}")?,
            Err(e) => return Err(e.into()),
        }
        writeln!(out)?;
    }

    Ok(shown)
}

/// Prompt until a number, a blank line, `q`, or end of input.
fn ask(
    feature: Feature,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    out: &mut impl Write,
) -> anyhow::Result<Option<f64>> {
    let label = display::feature_label(feature);
    let default = form_default(feature);
    loop {
        write!(out, "{label} [{default}]: ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let answer = line.trim();

        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        if answer.is_empty() {
            return Ok(Some(default));
        }
        match answer.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => writeln!(out, "  not a number: {answer:?}")?,
        }
    }
}
