//! dqcoach - Decision-Quality Coaching Simulator
//!
//! dqcoach drives a simulated coaching conversation: a human coach sends
//! messages, an external Judge scores each one along six decision-quality
//! dimensions, and a simulated persona's behavioral register advances
//! through an ordered stage ladder as coaching quality accumulates.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): Pure models and the ports (Judge,
//!   Responder, SessionStore, SummarySink) the core plugs into
//! - **Service Layer** (`services`): The scoring pipeline — sanitizer,
//!   aggregators, smoother, stage machine — and the per-turn controller
//! - **Infrastructure Layer** (`infrastructure`): HTTP adapters with
//!   retry, the in-memory session store, local demo adapters, config
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use dqcoach::services::TurnService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Wire a TurnService from config and process turns
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    CoachingStyle, Config, ConversationStatus, CoverageMap, Dimension, JudgeVerdict,
    PersonaConfig, PersonaStageState, ScoreCard, ScoringConfig, Session, SessionSummary,
    StageSpec, TranscriptTurn, TurnRequest, TurnResponse,
};
pub use domain::ports::{
    CollaboratorError, Judge, JudgeRequest, Responder, ResponderRequest, SessionStore, SummarySink,
};
pub use infrastructure::{ConfigError, ConfigLoader, RetryPolicy};
pub use services::{TurnError, TurnService};
