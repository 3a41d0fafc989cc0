/// Score sanitizer: the validation boundary between the untrusted Judge
/// output and everything downstream.
///
/// Pure and infallible. Invalid data is discarded silently; a verdict
/// where nothing survives still produces a usable (all-dropped) card and
/// never blocks the turn.
use crate::domain::models::{Dimension, JudgeVerdict, ScoreCard, ScoreSource};

/// Validates and clamps a raw judge verdict into a [`ScoreCard`].
///
/// For each of the six dimensions: coerce the raw value to a float and
/// retain it only when it is present, numeric, finite, and within
/// [0, 1]. Unknown keys in the verdict are ignored.
pub fn sanitize(verdict: &JudgeVerdict) -> ScoreCard {
    let retained = Dimension::ALL
        .into_iter()
        .filter_map(|dimension| {
            verdict
                .scores
                .get(dimension.as_str())
                .and_then(coerce)
                .map(|value| (dimension, value))
        })
        .collect();

    ScoreCard {
        retained,
        rationale: verdict.rationale.clone(),
        source: ScoreSource::Judged,
    }
}

/// Coerces a loose JSON value to a valid score.
///
/// `as_f64` covers integer and float representations; strings, booleans,
/// nulls, arrays, and objects all fail coercion. The finite check guards
/// values built programmatically rather than parsed.
fn coerce(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite() && (0.0..=1.0).contains(v))
}
