/// Score aggregation: the strict weakest-link scalar reported to the
/// caller, and the phase-weighted scalar that drives stage progression.
use crate::domain::models::{Dimension, PhaseWeights, ScoreCard};

/// Conversation life-cycle phase, bucketed by turn count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    /// Turns 1-6: problem framing dominates.
    Early,
    /// Turns 7-13: option and value work.
    Mid,
    /// Turns 14+: commitment and action.
    Late,
}

impl ConversationPhase {
    /// Buckets a 1-based turn number.
    pub fn from_turn(turn: u32) -> Self {
        match turn {
            0..=6 => ConversationPhase::Early,
            7..=13 => ConversationPhase::Mid,
            _ => ConversationPhase::Late,
        }
    }
}

/// Minimum across the retained dimension values; 0.0 when none survived
/// sanitization.
///
/// A message is only as good as its weakest addressed dimension, so a
/// coach cannot buy a high report by excelling on one axis and ignoring
/// the rest.
pub fn weakest_link(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Weighted mean over the dense score card, weights chosen by the turn's
/// conversation phase. Falls back to the weakest link when the selected
/// weight vector sums to zero.
///
/// This scalar — not the weakest link — feeds the smoother and the stage
/// machine, decoupling the reported score from the progression score.
pub fn phase_weighted(card: &ScoreCard, turn: u32, weights: &PhaseWeights) -> f64 {
    let vector = match ConversationPhase::from_turn(turn) {
        ConversationPhase::Early => &weights.early,
        ConversationPhase::Mid => &weights.mid,
        ConversationPhase::Late => &weights.late,
    };

    let total = vector.total();
    if total <= 0.0 {
        return weakest_link(&card.retained_values());
    }

    let weighted_sum: f64 = Dimension::ALL
        .into_iter()
        .map(|d| card.value(d) * vector.weight(d))
        .sum();
    weighted_sum / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DimensionWeights, ScoreSource};

    fn card(pairs: &[(Dimension, f64)]) -> ScoreCard {
        ScoreCard {
            retained: pairs.to_vec(),
            rationale: String::new(),
            source: ScoreSource::Judged,
        }
    }

    #[test]
    fn test_weakest_link_is_minimum() {
        assert!((weakest_link(&[0.9, 0.4, 0.7]) - 0.4).abs() < f64::EPSILON);
        assert!((weakest_link(&[0.2]) - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weakest_link_empty_is_zero() {
        assert!(weakest_link(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_phase_buckets() {
        assert_eq!(ConversationPhase::from_turn(1), ConversationPhase::Early);
        assert_eq!(ConversationPhase::from_turn(6), ConversationPhase::Early);
        assert_eq!(ConversationPhase::from_turn(7), ConversationPhase::Mid);
        assert_eq!(ConversationPhase::from_turn(13), ConversationPhase::Mid);
        assert_eq!(ConversationPhase::from_turn(14), ConversationPhase::Late);
        assert_eq!(ConversationPhase::from_turn(40), ConversationPhase::Late);
    }

    #[test]
    fn test_phase_weighted_is_weighted_mean() {
        let card = card(&[(Dimension::Framing, 1.0)]);
        let weights = PhaseWeights::default();
        // Early phase: only framing scored, so result = w_framing / total.
        let expected = weights.early.framing / weights.early.total();
        let got = phase_weighted(&card, 1, &weights);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_phase_selection_changes_result() {
        let card = card(&[
            (Dimension::Framing, 1.0),
            (Dimension::Commitment, 0.0),
        ]);
        let weights = PhaseWeights::default();
        let early = phase_weighted(&card, 2, &weights);
        let late = phase_weighted(&card, 20, &weights);
        // Framing is weighted heavier early than late.
        assert!(early > late);
    }

    #[test]
    fn test_uniform_scores_are_phase_invariant() {
        let card = card(&Dimension::ALL.map(|d| (d, 0.6)));
        let weights = PhaseWeights::default();
        for turn in [1, 8, 30] {
            assert!((phase_weighted(&card, turn, &weights) - 0.6).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_total_weight_falls_back_to_weakest_link() {
        let zero = DimensionWeights {
            framing: 0.0,
            alternatives: 0.0,
            information: 0.0,
            values: 0.0,
            reasoning: 0.0,
            commitment: 0.0,
        };
        let weights = PhaseWeights {
            early: zero.clone(),
            mid: zero.clone(),
            late: zero,
        };
        let card = card(&[(Dimension::Framing, 0.8), (Dimension::Values, 0.3)]);
        assert!((phase_weighted(&card, 1, &weights) - 0.3).abs() < f64::EPSILON);
    }
}
