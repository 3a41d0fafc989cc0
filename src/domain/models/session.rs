/// Session state: transcript, coverage, per-persona stage progress, and
/// the terminal-status summary.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::dimension::{CoverageMap, Dimension};
use super::persona::PersonaConfig;
use super::turn::TurnResponse;

/// Reporting status of a conversation.
///
/// `DqComplete` and `TurnLimitReached` are terminal for reporting
/// purposes; the underlying session object is never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversationStatus {
    InProgress,
    DqComplete,
    TurnLimitReached,
}

/// One (coach, persona) exchange in the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    /// 1-based turn number within the session.
    pub turn: u32,

    /// Coach message as received.
    pub coach: String,

    /// Generated persona reply.
    pub persona: String,

    pub timestamp: DateTime<Utc>,
}

/// Stage-machine state for one persona within one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaStageState {
    /// Index of the current stage in the persona's ladder.
    pub current: usize,

    /// High-water mark: highest stage index ever achieved.
    pub highest: usize,

    /// Per-stage consecutive-qualifying-turn counters.
    pub qualifying: Vec<u32>,

    /// Smoothed contextual score; `None` before the first judged turn.
    pub smoothed: Option<f64>,
}

impl PersonaStageState {
    /// Fresh state positioned at the persona's default stage.
    pub fn new(persona: &PersonaConfig) -> Self {
        let start = persona.default_stage_index();
        Self {
            current: start,
            highest: start,
            qualifying: vec![0; persona.stages.len()],
            smoothed: None,
        }
    }

    /// True when the indices or counter vector no longer fit the ladder —
    /// a logic-integrity fault the stage machine must repair.
    pub fn is_inconsistent(&self, persona: &PersonaConfig) -> bool {
        self.current >= persona.stages.len()
            || self.highest >= persona.stages.len()
            || self.qualifying.len() != persona.stages.len()
    }
}

/// Summary constructed once a session reaches a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub turns_used: u32,
    pub completed_dimensions: Vec<Dimension>,
    pub missed_dimensions: Vec<Dimension>,
    pub feedback: String,
    pub persona_id: String,
    pub stage: String,
}

/// A coaching conversation. Created on first turn referencing its id and
/// retained for process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,

    /// Cumulative processed-turn count; increases by exactly one per
    /// processed inbound message.
    pub turns: u32,

    /// Append-only conversation transcript.
    pub transcript: Vec<TranscriptTurn>,

    /// Sticky dimension coverage.
    pub coverage: CoverageMap,

    /// Lazily created stage state per persona.
    pub personas: HashMap<String, PersonaStageState>,

    /// Idempotency memo: last turn key and the response it produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_turn: Option<(String, TurnResponse)>,

    pub created_at: DateTime<Utc>,
    pub last_update_time: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            turns: 0,
            transcript: Vec::new(),
            coverage: CoverageMap::new(),
            personas: HashMap::new(),
            last_turn: None,
            created_at: now,
            last_update_time: now,
        }
    }

    /// Appends one exchange and bumps the modification time.
    pub fn append_exchange(&mut self, coach: String, persona: String) {
        let now = Utc::now();
        self.transcript.push(TranscriptTurn {
            turn: self.turns,
            coach,
            persona,
            timestamp: now,
        });
        self.last_update_time = now;
    }

    /// Resolves the reporting status against a persona's turn budget.
    ///
    /// Completion wins over the turn limit when both hold.
    pub fn status(&self, turn_budget: u32) -> ConversationStatus {
        if self.coverage.all_covered() {
            ConversationStatus::DqComplete
        } else if self.turns >= turn_budget {
            ConversationStatus::TurnLimitReached
        } else {
            ConversationStatus::InProgress
        }
    }

    /// Builds the terminal summary. Recomputed fresh on every call once a
    /// terminal condition holds — never cached.
    pub fn summary(&self, persona_id: &str, stage: &str) -> SessionSummary {
        let completed = self.coverage.completed();
        let missed = self.coverage.missed();
        let feedback = if missed.is_empty() {
            format!(
                "All six decision-quality dimensions were addressed in {} turns.",
                self.turns
            )
        } else {
            let missed_names: Vec<&str> = missed.iter().map(|d| d.as_str()).collect();
            format!(
                "{} of 6 dimensions addressed in {} turns; never reached the bar: {}.",
                completed.len(),
                self.turns,
                missed_names.join(", ")
            )
        };
        SessionSummary {
            turns_used: self.turns,
            completed_dimensions: completed,
            missed_dimensions: missed,
            feedback,
            persona_id: persona_id.to_string(),
            stage: stage.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::persona::StageSpec;

    fn persona() -> PersonaConfig {
        let stages = vec![
            StageSpec {
                key: "low".to_string(),
                min_score: 0.0,
                required_samples: None,
            },
            StageSpec {
                key: "high".to_string(),
                min_score: 0.5,
                required_samples: None,
            },
        ];
        let profiles = stages
            .iter()
            .map(|s| (s.key.clone(), "profile".to_string()))
            .collect();
        PersonaConfig {
            stages,
            monotonic: true,
            default_stage: "low".to_string(),
            default_required_samples: 2,
            regression_threshold: None,
            turn_budget: 10,
            profiles,
        }
    }

    #[test]
    fn test_new_session_is_in_progress() {
        let session = Session::new("s1", "coach-1");
        assert_eq!(session.turns, 0);
        assert_eq!(session.status(10), ConversationStatus::InProgress);
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_status_turn_limit() {
        let mut session = Session::new("s1", "coach-1");
        session.turns = 10;
        assert_eq!(session.status(10), ConversationStatus::TurnLimitReached);
    }

    #[test]
    fn test_status_completion_wins_over_turn_limit() {
        let mut session = Session::new("s1", "coach-1");
        session.turns = 10;
        for dimension in Dimension::ALL {
            session.coverage.mark(dimension);
        }
        assert_eq!(session.status(10), ConversationStatus::DqComplete);
    }

    #[test]
    fn test_stage_state_starts_at_default() {
        let persona = persona();
        let state = PersonaStageState::new(&persona);
        assert_eq!(state.current, 0);
        assert_eq!(state.highest, 0);
        assert_eq!(state.qualifying, vec![0, 0]);
        assert!(state.smoothed.is_none());
        assert!(!state.is_inconsistent(&persona));
    }

    #[test]
    fn test_inconsistent_state_detected() {
        let persona = persona();
        let mut state = PersonaStageState::new(&persona);
        state.current = 7;
        assert!(state.is_inconsistent(&persona));

        let mut state = PersonaStageState::new(&persona);
        state.qualifying.push(0);
        assert!(state.is_inconsistent(&persona));
    }

    #[test]
    fn test_summary_reports_missed_dimensions() {
        let mut session = Session::new("s1", "coach-1");
        session.turns = 4;
        session.coverage.mark(Dimension::Framing);
        session.coverage.mark(Dimension::Reasoning);

        let summary = session.summary("guarded", "low");
        assert_eq!(summary.turns_used, 4);
        assert_eq!(
            summary.completed_dimensions,
            vec![Dimension::Framing, Dimension::Reasoning]
        );
        assert_eq!(summary.missed_dimensions.len(), 4);
        assert!(summary.feedback.contains("2 of 6"));
        assert!(summary.feedback.contains("commitment"));
    }

    #[test]
    fn test_summary_when_complete() {
        let mut session = Session::new("s1", "coach-1");
        session.turns = 6;
        for dimension in Dimension::ALL {
            session.coverage.mark(dimension);
        }
        let summary = session.summary("guarded", "high");
        assert!(summary.missed_dimensions.is_empty());
        assert!(summary.feedback.contains("All six"));
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ConversationStatus::DqComplete).unwrap();
        assert_eq!(json, "\"dq-complete\"");
        let json = serde_json::to_string(&ConversationStatus::TurnLimitReached).unwrap();
        assert_eq!(json, "\"turn-limit-reached\"");
        let json = serde_json::to_string(&ConversationStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
