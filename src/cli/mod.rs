/// Command-line interface: a scripted demo session over the local
/// adapters, and a persona listing. Output is JSON lines on stdout;
/// logs go to stderr.
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::{Config, ConversationStatus, TurnRequest};
use crate::infrastructure::{
    HeuristicJudge, LoggingSummarySink, MemorySessionStore, RetryPolicy, TemplateResponder,
};
use crate::services::TurnService;

#[derive(Parser)]
#[command(name = "dqcoach", version, about = "Decision-quality coaching simulator")]
pub struct Cli {
    /// Load configuration from a specific file instead of .dqcoach/
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scripted coaching session through the full pipeline using
    /// the built-in local judge and responder
    Demo(DemoArgs),

    /// List configured personas and their stage ladders
    Personas,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Persona to coach
    #[arg(long, default_value = "guarded")]
    pub persona: String,

    /// Session identifier (random when omitted)
    #[arg(long)]
    pub session: Option<String>,
}

/// Fixed coach script exercising all phases: framing first, then
/// options/values, a filler turn, then commitment.
const DEMO_SCRIPT: &[&str] = &[
    "What decision are you actually facing here? What's the real problem?",
    "What are your goals, and what would a good outcome look like?",
    "What options do you have? Is there an alternative you haven't considered?",
    "ok",
    "What do you know for sure, and what would you still need to find out?",
    "Which trade-off matters most to you, and why?",
    "If you chose the first option, what consequences follow? Walk me through it.",
    "What's your next step, and when will you start?",
];

/// Runs the demo session, printing one JSON line per turn.
pub async fn execute_demo(config: Config, args: DemoArgs) -> Result<()> {
    let service = TurnService::new(
        Arc::new(HeuristicJudge),
        Arc::new(TemplateResponder),
        Arc::new(MemorySessionStore::new()),
        Arc::new(LoggingSummarySink),
        config.personas,
        config.scoring,
        RetryPolicy::from_config(&config.retry),
    );

    let session_id = args
        .session
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    for message in DEMO_SCRIPT {
        let response = service
            .process_turn(TurnRequest {
                session_id: session_id.clone(),
                user_id: "demo-coach".to_string(),
                message: (*message).to_string(),
                persona_id: args.persona.clone(),
                turn_key: None,
            })
            .await?;

        println!("{}", serde_json::to_string(&response)?);

        if response.status != ConversationStatus::InProgress {
            break;
        }
    }

    Ok(())
}

/// Prints the persona roster as one JSON object.
pub fn execute_personas(config: &Config) -> Result<()> {
    let mut roster = serde_json::Map::new();
    for (persona_id, persona) in &config.personas {
        let stages: Vec<serde_json::Value> = persona
            .stages
            .iter()
            .map(|s| {
                json!({
                    "key": s.key,
                    "min_score": s.min_score,
                    "required_samples": s.required_samples,
                })
            })
            .collect();
        roster.insert(
            persona_id.clone(),
            json!({
                "stages": stages,
                "monotonic": persona.monotonic,
                "default_stage": persona.default_stage,
                "turn_budget": persona.turn_budget,
            }),
        );
    }
    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}
