//! Shared test fixtures: scripted collaborators and persona builders.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use dqcoach::domain::ports::{
    CollaboratorError, Judge, JudgeRequest, Responder, ResponderRequest, SummarySink,
};
use dqcoach::infrastructure::{MemorySessionStore, RetryPolicy};
use dqcoach::{
    Dimension, JudgeVerdict, PersonaConfig, ScoringConfig, SessionSummary, StageSpec, TurnRequest,
    TurnService,
};

/// Judge that replays a scripted sequence of uniform scores, one per
/// call; the last entry repeats once the script is exhausted.
pub struct ScriptedJudge {
    script: Mutex<Vec<f64>>,
    position: AtomicU32,
    pub calls: AtomicU32,
}

impl ScriptedJudge {
    pub fn new(script: &[f64]) -> Self {
        Self {
            script: Mutex::new(script.to_vec()),
            position: AtomicU32::new(0),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Judge for ScriptedJudge {
    async fn evaluate(&self, _request: JudgeRequest) -> Result<JudgeVerdict, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let script = self.script.lock().unwrap();
        let index = (self.position.fetch_add(1, Ordering::SeqCst) as usize).min(script.len() - 1);
        let score = script[index];
        let scores = Dimension::ALL
            .into_iter()
            .map(|d| (d.as_str().to_string(), json!(score)))
            .collect();
        Ok(JudgeVerdict {
            scores,
            rationale: format!("scripted score {score}"),
        })
    }
}

/// Judge that replays scripted per-dimension verdicts.
pub struct VerdictJudge {
    verdicts: Mutex<Vec<JudgeVerdict>>,
    position: AtomicU32,
}

impl VerdictJudge {
    pub fn new(verdicts: Vec<JudgeVerdict>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts),
            position: AtomicU32::new(0),
        }
    }

    pub fn verdict(pairs: &[(&str, f64)]) -> JudgeVerdict {
        JudgeVerdict {
            scores: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), json!(v)))
                .collect(),
            rationale: "scripted".to_string(),
        }
    }
}

#[async_trait]
impl Judge for VerdictJudge {
    async fn evaluate(&self, _request: JudgeRequest) -> Result<JudgeVerdict, CollaboratorError> {
        let verdicts = self.verdicts.lock().unwrap();
        let index =
            (self.position.fetch_add(1, Ordering::SeqCst) as usize).min(verdicts.len() - 1);
        Ok(verdicts[index].clone())
    }
}

pub struct StubResponder;

#[async_trait]
impl Responder for StubResponder {
    async fn reply(&self, request: ResponderRequest) -> Result<String, CollaboratorError> {
        Ok(format!("[{}] acknowledged", request.persona_id))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub recorded: Mutex<Vec<SessionSummary>>,
}

#[async_trait]
impl SummarySink for RecordingSink {
    async fn record(&self, _session_id: &str, summary: &SessionSummary) -> Result<()> {
        self.recorded.lock().unwrap().push(summary.clone());
        Ok(())
    }
}

pub fn stage(key: &str, min_score: f64, required_samples: Option<u32>) -> StageSpec {
    StageSpec {
        key: key.to_string(),
        min_score,
        required_samples,
    }
}

/// Persona with the given ladder; profiles generated per stage.
pub fn persona(
    stages: Vec<StageSpec>,
    monotonic: bool,
    regression_threshold: Option<f64>,
    turn_budget: u32,
) -> PersonaConfig {
    let profiles: HashMap<String, String> = stages
        .iter()
        .map(|s| (s.key.clone(), format!("Speaks in the {} register.", s.key)))
        .collect();
    let default_stage = stages[0].key.clone();
    PersonaConfig {
        stages,
        monotonic,
        default_stage,
        default_required_samples: 2,
        regression_threshold,
        turn_budget,
        profiles,
    }
}

/// Scoring config with smoothing disabled (alpha = 1) so scripted judge
/// scores drive the stage machine directly.
pub fn unsmoothed_scoring() -> ScoringConfig {
    ScoringConfig {
        smoothing_alpha: 1.0,
        ..ScoringConfig::default()
    }
}

/// Wires a TurnService over the in-memory store with a fast retry
/// policy.
pub fn build_service(
    judge: Arc<dyn Judge>,
    personas: HashMap<String, PersonaConfig>,
    scoring: ScoringConfig,
    sink: Arc<RecordingSink>,
) -> TurnService {
    TurnService::new(
        judge,
        Arc::new(StubResponder),
        Arc::new(MemorySessionStore::new()),
        sink,
        personas,
        scoring,
        RetryPolicy::new(2, 10, 50),
    )
}

pub fn turn_request(session_id: &str, persona_id: &str, message: &str) -> TurnRequest {
    TurnRequest {
        session_id: session_id.to_string(),
        user_id: "coach-1".to_string(),
        message: message.to_string(),
        persona_id: persona_id.to_string(),
        turn_key: None,
    }
}
