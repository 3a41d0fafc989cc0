/// Score payloads: the untrusted Judge verdict and the sanitized per-turn
/// score card derived from it.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::dimension::Dimension;

/// Raw output of the external Judge for a single turn.
///
/// The shape is untrusted: scores arrive as loose JSON values keyed by
/// whatever strings the judge emitted. Nothing downstream reads this
/// directly; it passes through the sanitizer first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JudgeVerdict {
    /// Per-dimension scores as produced by the judge. May be missing keys,
    /// carry extra keys, or hold non-numeric values.
    #[serde(default)]
    pub scores: HashMap<String, serde_json::Value>,

    /// Free-text justification for the scores.
    #[serde(default)]
    pub rationale: String,
}

/// Where a turn's scores came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Scores produced by the external Judge and sanitized.
    Judged,
    /// Scores forced to the low-content floor without invoking the Judge.
    MinimalMessageFloor,
}

/// Sanitized, immutable scores for one turn.
///
/// `retained` holds only the dimensions that survived validation; every
/// value is in [0, 1]. Dimensions that were missing or invalid are absent
/// here and read as 0.0 through [`ScoreCard::value`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Valid (dimension, score) pairs in canonical dimension order.
    pub retained: Vec<(Dimension, f64)>,

    /// Judge rationale, or the fixed floor explanation.
    pub rationale: String,

    /// Provenance tag.
    pub source: ScoreSource,
}

impl ScoreCard {
    /// Builds the floor card used for minimal-message turns: all six
    /// dimensions retained at `floor`.
    pub fn floor(floor: f64, rationale: impl Into<String>) -> Self {
        Self {
            retained: Dimension::ALL.into_iter().map(|d| (d, floor)).collect(),
            rationale: rationale.into(),
            source: ScoreSource::MinimalMessageFloor,
        }
    }

    /// Dense read: the retained score for `dimension`, or 0.0 if it was
    /// dropped during sanitization.
    pub fn value(&self, dimension: Dimension) -> f64 {
        self.retained
            .iter()
            .find(|(d, _)| *d == dimension)
            .map_or(0.0, |(_, v)| *v)
    }

    /// The retained values alone, for weakest-link aggregation.
    pub fn retained_values(&self) -> Vec<f64> {
        self.retained.iter().map(|(_, v)| *v).collect()
    }
}
