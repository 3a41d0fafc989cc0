/// Per-turn request/response shapes exchanged with the hosting layer.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::session::{ConversationStatus, SessionSummary};

/// One inbound coach message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Session identifier; the session is created on first reference.
    pub session_id: String,

    /// Coach (human) identifier.
    pub user_id: String,

    /// Free-text coach message.
    pub message: String,

    /// Persona selector; must name a configured persona.
    pub persona_id: String,

    /// Optional caller-supplied idempotency key for this logical turn.
    /// Redelivery with the same key returns the memoized response instead
    /// of reprocessing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_key: Option<String>,
}

/// Detected coaching style for the current message, used to parameterize
/// the Responder call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachingStyle {
    /// Advice-giving, prescriptive phrasing.
    Directive,
    /// Open questions and invitations.
    Explorative,
    /// Both registers present, or neither.
    Mixed,
}

/// Everything the caller gets back for one processed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    /// Generated persona reply.
    pub reply: String,

    /// Sanitized per-dimension scores, dropped entries defaulted to 0.
    /// BTreeMap keeps the wire order stable.
    pub scores: BTreeMap<String, f64>,

    /// Judge rationale, or the minimal-message floor explanation.
    pub rationale: String,

    /// Minimum across the retained dimension scores (0 when none survived).
    pub weakest_link: f64,

    /// Smoothed contextual score driving stage progression.
    pub smoothed_score: f64,

    /// Resolved stage key for the active persona.
    pub stage: String,

    /// Detected coaching style for this message.
    pub style: CoachingStyle,

    pub turns_used: u32,
    pub turns_remaining: u32,

    /// Sticky coverage flags keyed by dimension name.
    pub coverage: BTreeMap<String, bool>,

    pub status: ConversationStatus,

    /// Present once `status` leaves `in-progress`; recomputed fresh on
    /// every subsequent call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SessionSummary>,
}
