/// Persona and stage configuration for the behavioral state machine.
///
/// Personas are pure configuration: an ordered stage ladder, progression
/// parameters, and the behavioral-profile text handed to the Responder.
/// No code path branches on a specific persona; everything the stage
/// machine needs lives here and is validated once at load time.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// One rung of a persona's stage ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StageSpec {
    /// Stage key, unique within the persona (e.g. "tentative").
    pub key: String,

    /// Minimum smoothed score this stage requires.
    pub min_score: f64,

    /// Consecutive qualifying turns required to commit this stage.
    /// Falls back to the persona default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_samples: Option<u32>,
}

/// Configuration for one simulated persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PersonaConfig {
    /// Ordered stage ladder with strictly increasing `min_score`.
    pub stages: Vec<StageSpec>,

    /// When true the current stage never regresses once committed.
    #[serde(default = "default_monotonic")]
    pub monotonic: bool,

    /// Stage to start in, and to reset to on logic-integrity faults.
    pub default_stage: String,

    /// Qualifying-turn requirement for stages without an override.
    #[serde(default = "default_required_samples")]
    pub default_required_samples: u32,

    /// Regressable mode only: demote when the score falls more than this
    /// far below the current stage's minimum. Absent means regression is
    /// unconditional each turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regression_threshold: Option<f64>,

    /// Maximum coach turns before the session reports `turn-limit-reached`.
    #[serde(default = "default_turn_budget")]
    pub turn_budget: u32,

    /// Stage key -> behavioral-profile text passed verbatim to the
    /// Responder. Data, not algorithm.
    pub profiles: HashMap<String, String>,
}

const fn default_monotonic() -> bool {
    true
}

const fn default_required_samples() -> u32 {
    2
}

const fn default_turn_budget() -> u32 {
    20
}

/// Validation failures for a persona definition.
#[derive(Debug, Error)]
pub enum PersonaConfigError {
    #[error("persona '{0}' has no stages")]
    EmptyStages(String),

    #[error("persona '{persona}' stage '{stage}' min_score {min_score} is outside [0, 1]")]
    ScoreOutOfRange {
        persona: String,
        stage: String,
        min_score: f64,
    },

    #[error("persona '{persona}' stage '{stage}' does not strictly increase min_score")]
    NonIncreasingStages { persona: String, stage: String },

    #[error("persona '{persona}' stage '{stage}' requires 0 samples; minimum is 1")]
    ZeroSampleCount { persona: String, stage: String },

    #[error("persona '{persona}' default stage '{stage}' is not in the stage list")]
    UnknownDefaultStage { persona: String, stage: String },

    #[error("persona '{persona}' stage '{stage}' has no behavioral profile")]
    MissingProfile { persona: String, stage: String },

    #[error("persona '{0}' turn_budget must be at least 1")]
    ZeroTurnBudget(String),

    #[error("persona '{persona}' regression_threshold {threshold} is outside [0, 1]")]
    InvalidRegressionThreshold { persona: String, threshold: f64 },
}

impl PersonaConfig {
    /// Validates the stage ladder and progression parameters.
    ///
    /// Called once at configuration load; the stage machine assumes a
    /// validated config and only falls back defensively at runtime.
    pub fn validate(&self, persona_id: &str) -> Result<(), PersonaConfigError> {
        if self.stages.is_empty() {
            return Err(PersonaConfigError::EmptyStages(persona_id.to_string()));
        }

        let mut previous: Option<f64> = None;
        for stage in &self.stages {
            if !(0.0..=1.0).contains(&stage.min_score) {
                return Err(PersonaConfigError::ScoreOutOfRange {
                    persona: persona_id.to_string(),
                    stage: stage.key.clone(),
                    min_score: stage.min_score,
                });
            }
            if let Some(prev) = previous {
                if stage.min_score <= prev {
                    return Err(PersonaConfigError::NonIncreasingStages {
                        persona: persona_id.to_string(),
                        stage: stage.key.clone(),
                    });
                }
            }
            previous = Some(stage.min_score);

            if stage.required_samples == Some(0) {
                return Err(PersonaConfigError::ZeroSampleCount {
                    persona: persona_id.to_string(),
                    stage: stage.key.clone(),
                });
            }
            if !self.profiles.contains_key(&stage.key) {
                return Err(PersonaConfigError::MissingProfile {
                    persona: persona_id.to_string(),
                    stage: stage.key.clone(),
                });
            }
        }

        if self.stage_index(&self.default_stage).is_none() {
            return Err(PersonaConfigError::UnknownDefaultStage {
                persona: persona_id.to_string(),
                stage: self.default_stage.clone(),
            });
        }
        if self.default_required_samples == 0 {
            return Err(PersonaConfigError::ZeroSampleCount {
                persona: persona_id.to_string(),
                stage: "(default)".to_string(),
            });
        }
        if self.turn_budget == 0 {
            return Err(PersonaConfigError::ZeroTurnBudget(persona_id.to_string()));
        }
        if let Some(threshold) = self.regression_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(PersonaConfigError::InvalidRegressionThreshold {
                    persona: persona_id.to_string(),
                    threshold,
                });
            }
        }

        Ok(())
    }

    /// Index of `key` in the stage ladder.
    pub fn stage_index(&self, key: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.key == key)
    }

    /// Index of the configured default stage, 0 when the config is
    /// somehow inconsistent at runtime.
    pub fn default_stage_index(&self) -> usize {
        self.stage_index(&self.default_stage).unwrap_or(0)
    }

    /// Qualifying-turn requirement for the stage at `index`.
    pub fn required_samples(&self, index: usize) -> u32 {
        self.stages
            .get(index)
            .and_then(|s| s.required_samples)
            .unwrap_or(self.default_required_samples)
    }

    /// Behavioral-profile text for a stage key.
    pub fn profile(&self, stage_key: &str) -> Option<&str> {
        self.profiles.get(stage_key).map(String::as_str)
    }
}
