/// Session controller: sequences the full per-turn pipeline.
///
/// Order per inbound message: minimal-message check -> Judge (retried) ->
/// sanitizer -> {weakest-link, phase-weighted} -> smoother -> stage
/// machine -> style classification -> Responder (retried) -> transcript /
/// coverage / status bookkeeping. The two external calls are strictly
/// sequential; scoring completes before reply generation begins.
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::models::{
    ConversationStatus, Dimension, PersonaConfig, PersonaStageState, ScoreCard, ScoringConfig,
    Session, TurnRequest, TurnResponse,
};
use crate::domain::ports::{
    CollaboratorError, Judge, JudgeRequest, Responder, ResponderRequest, SessionStore, SummarySink,
};
use crate::infrastructure::retry::RetryPolicy;
use crate::services::aggregator::{phase_weighted, weakest_link};
use crate::services::sanitizer::sanitize;
use crate::services::smoother::smooth;
use crate::services::stage_machine;
use crate::services::style;

/// Exact low-content phrases that bypass the Judge. Matched against the
/// trimmed, lowercased message; any additional content disables the
/// short-circuit.
const MINIMAL_PHRASES: &[&str] = &[
    "ok",
    "okay",
    "k",
    "kk",
    "sure",
    "yes",
    "yeah",
    "yep",
    "no",
    "nope",
    "right",
    "fine",
    "cool",
    "great",
    "nice",
    "good",
    "thanks",
    "thank you",
    "hmm",
    "hm",
    "uh huh",
    "mhm",
    "i see",
    "got it",
    "go on",
    "continue",
    "tell me more",
    "and",
    "so",
    "then",
    "interesting",
    "wow",
    "really",
    "oh",
    "alright",
];

/// Fixed rationale attached to floor-scored turns.
const MINIMAL_MESSAGE_RATIONALE: &str =
    "Minimal acknowledgement with no coaching content; scored at the low-content floor.";

/// A turn either fully completes or fails outright; there is no partial
/// success and no way to resume mid-pipeline.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    /// A collaborator call failed after exhausting retries (transient
    /// classes) or immediately (permanent classes).
    #[error("collaborator failure: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Catch-all for unexpected pipeline failures, distinct from the
    /// success payload.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Orchestrates per-turn ingestion, scoring, progression, and
/// termination detection across all sessions.
pub struct TurnService {
    judge: Arc<dyn Judge>,
    responder: Arc<dyn Responder>,
    store: Arc<dyn SessionStore>,
    sink: Arc<dyn SummarySink>,
    personas: HashMap<String, PersonaConfig>,
    scoring: ScoringConfig,
    retry: RetryPolicy,
}

impl TurnService {
    /// Creates the controller. Persona configs are expected to be
    /// validated at load time; the stage machine repairs runtime
    /// inconsistencies defensively.
    pub fn new(
        judge: Arc<dyn Judge>,
        responder: Arc<dyn Responder>,
        store: Arc<dyn SessionStore>,
        sink: Arc<dyn SummarySink>,
        personas: HashMap<String, PersonaConfig>,
        scoring: ScoringConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            judge,
            responder,
            store,
            sink,
            personas,
            scoring,
            retry,
        }
    }

    /// Processes one inbound coach message.
    ///
    /// The session handle is held for the whole turn, so concurrent
    /// requests against the same session id queue instead of racing on
    /// the turn counter and stage state. Redelivery with a matching
    /// `turn_key` returns the memoized response without reprocessing.
    #[instrument(
        skip(self, request),
        fields(session_id = %request.session_id, persona_id = %request.persona_id),
        err
    )]
    pub async fn process_turn(&self, request: TurnRequest) -> Result<TurnResponse, TurnError> {
        let persona = self
            .personas
            .get(&request.persona_id)
            .ok_or_else(|| TurnError::UnknownPersona(request.persona_id.clone()))?;

        let handle = self
            .store
            .checkout(&request.session_id, &request.user_id)
            .await;
        let mut session = handle.lock().await;

        if let (Some(key), Some((last_key, cached))) = (&request.turn_key, &session.last_turn) {
            if key == last_key {
                debug!(turn_key = %key, "duplicate turn delivery; returning memoized response");
                return Ok(cached.clone());
            }
        }

        let response = self.run_pipeline(&mut session, &request, persona).await?;

        if let Some(key) = request.turn_key {
            session.last_turn = Some((key, response.clone()));
        }
        Ok(response)
    }

    /// The pipeline proper. No session mutation happens before the
    /// commit block at the end, so a failed turn leaves the session
    /// exactly as it was.
    async fn run_pipeline(
        &self,
        session: &mut Session,
        request: &TurnRequest,
        persona: &PersonaConfig,
    ) -> Result<TurnResponse, TurnError> {
        let turn = session.turns + 1;

        let card = if is_minimal_message(&request.message) {
            debug!("minimal message; forcing floor scores without judge call");
            ScoreCard::floor(self.scoring.minimal_score, MINIMAL_MESSAGE_RATIONALE)
        } else {
            let judge_request = JudgeRequest {
                transcript: session.transcript.clone(),
                message: request.message.clone(),
            };
            let verdict = self
                .retry
                .execute(|| self.judge.evaluate(judge_request.clone()))
                .await?;
            sanitize(&verdict)
        };

        let weakest = weakest_link(&card.retained_values());
        let contextual = phase_weighted(&card, turn, &self.scoring.weights);

        let mut stage_state = session
            .personas
            .get(&request.persona_id)
            .cloned()
            .unwrap_or_else(|| PersonaStageState::new(persona));
        let smoothed = smooth(stage_state.smoothed, contextual, self.scoring.smoothing_alpha);
        stage_state.smoothed = Some(smoothed);

        let stage_index =
            stage_machine::advance(&request.persona_id, persona, &mut stage_state, smoothed);
        let mut stage_key = persona.stages[stage_index].key.clone();
        let profile = match persona.profile(&stage_key) {
            Some(profile) => profile.to_string(),
            None => {
                // Validated configs always carry a profile per stage, so a
                // miss here is the same integrity fault as a bad index.
                stage_machine::reset_to_default(&request.persona_id, persona, &mut stage_state);
                stage_key = persona.stages[stage_state.current].key.clone();
                persona.profile(&stage_key).unwrap_or_default().to_string()
            }
        };

        let detected_style = style::classify(&request.message);
        let responder_request = ResponderRequest {
            message: request.message.clone(),
            profile,
            persona_id: request.persona_id.clone(),
            style: detected_style,
            history: session.transcript.clone(),
        };
        let reply = self
            .retry
            .execute(|| self.responder.reply(responder_request.clone()))
            .await?;

        // Commit.
        session.turns = turn;
        session.append_exchange(request.message.clone(), reply.clone());
        for (dimension, value) in &card.retained {
            if *value >= self.scoring.coverage_threshold {
                session.coverage.mark(*dimension);
            }
        }
        session
            .personas
            .insert(request.persona_id.clone(), stage_state);

        let status = session.status(persona.turn_budget);
        let turns_remaining = persona.turn_budget.saturating_sub(session.turns);
        let summary = if status == ConversationStatus::InProgress {
            None
        } else {
            let summary = session.summary(&request.persona_id, &stage_key);
            if let Err(error) = self.sink.record(&session.id, &summary).await {
                warn!(%error, session_id = %session.id, "failed to deliver session summary");
            }
            Some(summary)
        };

        let scores: BTreeMap<String, f64> = Dimension::ALL
            .into_iter()
            .map(|d| (d.as_str().to_string(), card.value(d)))
            .collect();
        let coverage: BTreeMap<String, bool> = Dimension::ALL
            .into_iter()
            .map(|d| (d.as_str().to_string(), session.coverage.is_covered(d)))
            .collect();

        Ok(TurnResponse {
            reply,
            scores,
            rationale: card.rationale,
            weakest_link: weakest,
            smoothed_score: smoothed,
            stage: stage_key,
            style: detected_style,
            turns_used: session.turns,
            turns_remaining,
            coverage,
            status,
            summary,
        })
    }
}

/// Exact, case-insensitive match on the trimmed message.
fn is_minimal_message(message: &str) -> bool {
    let trimmed = message.trim().to_lowercase();
    MINIMAL_PHRASES.contains(&trimmed.as_str())
}
