/// Persona stage machine.
///
/// A generic, configuration-driven state machine over the persona's
/// ordered stage ladder. Promotion is sample-gated for hysteresis: a
/// stage commits only after enough consecutive qualifying turns.
/// Regression behavior depends on the persona configuration.
use tracing::warn;

use crate::domain::models::{PersonaConfig, PersonaStageState};

/// Advances `state` with this turn's smoothed contextual score and
/// returns the resolved current stage index (always in bounds for
/// `persona.stages`).
///
/// Inconsistent state — indices or counters that no longer fit the
/// ladder — is a logic-integrity fault, repaired by a deterministic
/// reset to the persona's default stage. Never surfaced to the caller.
pub fn advance(
    persona_id: &str,
    persona: &PersonaConfig,
    state: &mut PersonaStageState,
    score: f64,
) -> usize {
    if state.is_inconsistent(persona) {
        reset_to_default(persona_id, persona, state);
    }

    if persona.monotonic {
        advance_monotonic(persona, state, score);
    } else {
        advance_regressable(persona, state, score);
    }

    if state.current >= persona.stages.len() {
        reset_to_default(persona_id, persona, state);
    }
    state.current
}

/// Restores the invariant: current and high-water mark at the default
/// stage, all counters cleared.
pub fn reset_to_default(persona_id: &str, persona: &PersonaConfig, state: &mut PersonaStageState) {
    warn!(
        persona_id,
        current = state.current,
        highest = state.highest,
        "stage state inconsistent with persona ladder; resetting to default stage"
    );
    let start = persona.default_stage_index();
    state.current = start;
    state.highest = start;
    state.qualifying = vec![0; persona.stages.len()];
}

/// Scans forward from just past the high-water mark. Qualifying turns
/// accumulate per candidate stage; a miss resets that candidate's
/// counter. A matured counter commits the stage as both highest achieved
/// and current — the current stage never regresses.
fn advance_monotonic(persona: &PersonaConfig, state: &mut PersonaStageState, score: f64) {
    let mut committed = None;
    for idx in (state.highest + 1)..persona.stages.len() {
        if score >= persona.stages[idx].min_score {
            state.qualifying[idx] += 1;
            if state.qualifying[idx] >= persona.required_samples(idx) {
                committed = Some(idx);
            }
        } else {
            state.qualifying[idx] = 0;
        }
    }
    if let Some(idx) = committed {
        state.highest = idx;
        state.current = idx;
    }
}

/// Promotion works like monotonic mode but scans from the current stage,
/// and only the high-water mark is protected. Demotion depends on the
/// regression threshold:
///
/// - configured: demote only when the score falls more than the
///   threshold below the current stage's own minimum, then re-scan
///   downward for the highest stage still satisfied;
/// - absent: regression is unconditional — every turn the current stage
///   drops to the highest stage whose minimum the score satisfies,
///   whenever that lies below it.
fn advance_regressable(persona: &PersonaConfig, state: &mut PersonaStageState, score: f64) {
    let mut committed = None;
    for idx in (state.current + 1)..persona.stages.len() {
        if score >= persona.stages[idx].min_score {
            state.qualifying[idx] += 1;
            if state.qualifying[idx] >= persona.required_samples(idx) {
                committed = Some(idx);
            }
        } else {
            state.qualifying[idx] = 0;
        }
    }
    if let Some(idx) = committed {
        state.current = idx;
        state.highest = state.highest.max(idx);
    }

    match persona.regression_threshold {
        Some(threshold) => {
            let current_min = persona.stages[state.current].min_score;
            if score < current_min - threshold {
                state.current = highest_satisfied(persona, score);
            }
        }
        None => {
            let satisfied = highest_satisfied(persona, score);
            if satisfied < state.current {
                state.current = satisfied;
            }
        }
    }
}

/// Highest stage index whose minimum the score satisfies, scanning from
/// the top down; the base stage when none qualifies.
fn highest_satisfied(persona: &PersonaConfig, score: f64) -> usize {
    (0..persona.stages.len())
        .rev()
        .find(|&idx| score >= persona.stages[idx].min_score)
        .unwrap_or(0)
}
