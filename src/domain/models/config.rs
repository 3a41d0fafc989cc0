use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::dimension::Dimension;
use super::persona::{PersonaConfig, StageSpec};

/// Main configuration structure for dqcoach.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retry policy for collaborator calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Scoring pipeline tuning
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// External Judge service endpoint
    #[serde(default = "default_judge_endpoint")]
    pub judge: EndpointConfig,

    /// External Responder service endpoint
    #[serde(default = "default_responder_endpoint")]
    pub responder: EndpointConfig,

    /// Persona definitions keyed by persona id
    #[serde(default = "default_personas")]
    pub personas: HashMap<String, PersonaConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            retry: RetryConfig::default(),
            scoring: ScoringConfig::default(),
            judge: default_judge_endpoint(),
            responder: default_responder_endpoint(),
            personas: default_personas(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Retry policy configuration for Judge/Responder calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    10_000
}

const fn default_max_backoff_ms() -> u64 {
    300_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// External service endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointConfig {
    /// Base URL of the service
    pub base_url: String,

    /// Bearer token (can also come from env via figment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    60
}

fn default_judge_endpoint() -> EndpointConfig {
    EndpointConfig {
        base_url: "http://localhost:8091".to_string(),
        api_key: None,
        timeout_secs: default_timeout_secs(),
    }
}

fn default_responder_endpoint() -> EndpointConfig {
    EndpointConfig {
        base_url: "http://localhost:8092".to_string(),
        api_key: None,
        timeout_secs: default_timeout_secs(),
    }
}

/// Scoring pipeline tuning: smoothing, floors, thresholds, and the
/// phase-keyed weight vectors for the contextual aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    /// EMA responsiveness: weight of the current turn's contextual score.
    #[serde(default = "default_smoothing_alpha")]
    pub smoothing_alpha: f64,

    /// Minimum sanitized score for a dimension to count as addressed.
    #[serde(default = "default_coverage_threshold")]
    pub coverage_threshold: f64,

    /// Score forced onto all dimensions for minimal-message turns.
    #[serde(default = "default_minimal_score")]
    pub minimal_score: f64,

    /// Weight vectors keyed by conversation phase.
    #[serde(default)]
    pub weights: PhaseWeights,
}

const fn default_smoothing_alpha() -> f64 {
    0.7
}

const fn default_coverage_threshold() -> f64 {
    0.3
}

const fn default_minimal_score() -> f64 {
    0.1
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: default_smoothing_alpha(),
            coverage_threshold: default_coverage_threshold(),
            minimal_score: default_minimal_score(),
            weights: PhaseWeights::default(),
        }
    }
}

/// One weight per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DimensionWeights {
    pub framing: f64,
    pub alternatives: f64,
    pub information: f64,
    pub values: f64,
    pub reasoning: f64,
    pub commitment: f64,
}

impl DimensionWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Framing => self.framing,
            Dimension::Alternatives => self.alternatives,
            Dimension::Information => self.information,
            Dimension::Values => self.values,
            Dimension::Reasoning => self.reasoning,
            Dimension::Commitment => self.commitment,
        }
    }

    pub fn total(&self) -> f64 {
        Dimension::ALL.into_iter().map(|d| self.weight(d)).sum()
    }
}

/// Weight vectors for the three conversation phases.
///
/// Defaults emphasize problem framing and information gathering early,
/// option/value work mid-conversation, and commitment late.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PhaseWeights {
    /// Turns 1-6
    pub early: DimensionWeights,
    /// Turns 7-13
    pub mid: DimensionWeights,
    /// Turns 14+
    pub late: DimensionWeights,
}

impl Default for PhaseWeights {
    fn default() -> Self {
        Self {
            early: DimensionWeights {
                framing: 2.0,
                alternatives: 1.0,
                information: 1.5,
                values: 1.0,
                reasoning: 1.0,
                commitment: 0.5,
            },
            mid: DimensionWeights {
                framing: 1.0,
                alternatives: 1.5,
                information: 1.0,
                values: 1.5,
                reasoning: 1.5,
                commitment: 1.0,
            },
            late: DimensionWeights {
                framing: 0.5,
                alternatives: 1.0,
                information: 0.75,
                values: 1.0,
                reasoning: 1.25,
                commitment: 2.0,
            },
        }
    }
}

fn stage(key: &str, min_score: f64, required_samples: Option<u32>) -> StageSpec {
    StageSpec {
        key: key.to_string(),
        min_score,
        required_samples,
    }
}

/// Built-in personas: one monotonic, one regressable. Overridable from
/// config files; profile text is data handed to the Responder.
fn default_personas() -> HashMap<String, PersonaConfig> {
    let mut personas = HashMap::new();

    let guarded_stages = vec![
        stage("withdrawn", 0.0, None),
        stage("tentative", 0.25, None),
        stage("open", 0.45, None),
        stage("reflective", 0.65, Some(3)),
        stage("committed", 0.8, Some(3)),
    ];
    let guarded_profiles: HashMap<String, String> = [
        (
            "withdrawn",
            "Answers in short, flat sentences and volunteers nothing. Deflects \
             questions about feelings. Keeps replies under two sentences.",
        ),
        (
            "tentative",
            "Gives brief answers with occasional hedged detail. Will follow a \
             concrete question but not an abstract one. At most two sentences.",
        ),
        (
            "open",
            "Shares context willingly and names one concern at a time. Responds \
             to open questions with genuine material. Up to three sentences.",
        ),
        (
            "reflective",
            "Connects options to what matters to them and weighs trade-offs out \
             loud. Builds on the coach's framing. Up to three sentences.",
        ),
        (
            "committed",
            "Talks in next steps and owns the decision. References earlier \
             parts of the conversation. Up to four sentences.",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    personas.insert(
        "guarded".to_string(),
        PersonaConfig {
            stages: guarded_stages,
            monotonic: true,
            default_stage: "withdrawn".to_string(),
            default_required_samples: 2,
            regression_threshold: None,
            turn_budget: 20,
            profiles: guarded_profiles,
        },
    );

    let mercurial_stages = vec![
        stage("resistant", 0.0, None),
        stage("curious", 0.3, None),
        stage("engaged", 0.55, None),
        stage("resolved", 0.75, Some(3)),
    ];
    let mercurial_profiles: HashMap<String, String> = [
        (
            "resistant",
            "Pushes back on premises and questions the point of the exercise. \
             Sharp but not hostile. Keeps replies under two sentences.",
        ),
        (
            "curious",
            "Entertains the question while reserving judgment. Asks what the \
             coach is getting at. Up to three sentences.",
        ),
        (
            "engaged",
            "Works the problem actively and offers competing considerations \
             unprompted. Up to three sentences.",
        ),
        (
            "resolved",
            "States a preferred option with reasons and asks what could change \
             their mind. Up to four sentences.",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    personas.insert(
        "mercurial".to_string(),
        PersonaConfig {
            stages: mercurial_stages,
            monotonic: false,
            default_stage: "resistant".to_string(),
            default_required_samples: 2,
            regression_threshold: Some(0.15),
            turn_budget: 16,
            profiles: mercurial_profiles,
        },
    );

    personas
}
