use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::{Config, PersonaConfigError};

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid smoothing_alpha: {0}. Must be within (0, 1]")]
    InvalidSmoothingAlpha(f64),

    #[error("Invalid coverage_threshold: {0}. Must be within [0, 1]")]
    InvalidCoverageThreshold(f64),

    #[error("Invalid minimal_score: {0}. Must be within [0, 1]")]
    InvalidMinimalScore(f64),

    #[error("Phase weight vector '{0}' must have a positive total weight")]
    NonPositiveWeights(&'static str),

    #[error("Judge base_url cannot be empty")]
    EmptyJudgeUrl,

    #[error("Responder base_url cannot be empty")]
    EmptyResponderUrl,

    #[error("At least one persona must be configured")]
    NoPersonas,

    #[error(transparent)]
    Persona(#[from] PersonaConfigError),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .dqcoach/config.yaml (project config)
    /// 3. .dqcoach/local.yaml (local overrides, optional)
    /// 4. Environment variables (DQCOACH_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".dqcoach/config.yaml"))
            .merge(Yaml::file(".dqcoach/local.yaml"))
            .merge(Env::prefixed("DQCOACH_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }
        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let scoring = &config.scoring;
        if !(scoring.smoothing_alpha > 0.0 && scoring.smoothing_alpha <= 1.0) {
            return Err(ConfigError::InvalidSmoothingAlpha(scoring.smoothing_alpha));
        }
        if !(0.0..=1.0).contains(&scoring.coverage_threshold) {
            return Err(ConfigError::InvalidCoverageThreshold(
                scoring.coverage_threshold,
            ));
        }
        if !(0.0..=1.0).contains(&scoring.minimal_score) {
            return Err(ConfigError::InvalidMinimalScore(scoring.minimal_score));
        }
        for (name, vector) in [
            ("early", &scoring.weights.early),
            ("mid", &scoring.weights.mid),
            ("late", &scoring.weights.late),
        ] {
            if vector.total() <= 0.0 {
                return Err(ConfigError::NonPositiveWeights(name));
            }
        }

        if config.judge.base_url.is_empty() {
            return Err(ConfigError::EmptyJudgeUrl);
        }
        if config.responder.base_url.is_empty() {
            return Err(ConfigError::EmptyResponderUrl);
        }

        if config.personas.is_empty() {
            return Err(ConfigError::NoPersonas);
        }
        for (persona_id, persona) in &config.personas {
            persona.validate(persona_id)?;
        }

        Ok(())
    }
}
