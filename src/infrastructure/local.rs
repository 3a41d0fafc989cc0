/// Local collaborator adapters: a deterministic heuristic judge and a
/// template responder. These back the `demo` subcommand and tests; no
/// network, no credentials.
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;

use crate::domain::models::{CoachingStyle, Dimension, JudgeVerdict};
use crate::domain::ports::{
    CollaboratorError, Judge, JudgeRequest, Responder, ResponderRequest,
};

/// Keyword cues per dimension. Each hit adds a fixed boost on top of a
/// small length-based base score.
fn dimension_cues(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::Framing => &["problem", "decision", "really about", "goal", "frame"],
        Dimension::Alternatives => &["option", "alternative", "instead", "else could", "other way"],
        Dimension::Information => &["know", "evidence", "data", "find out", "fact"],
        Dimension::Values => &["matter", "important", "value", "care about", "trade-off"],
        Dimension::Reasoning => &["because", "why", "follow", "if ", "consequence"],
        Dimension::Commitment => &["next step", "commit", "when will", "plan", "start"],
    }
}

/// Deterministic judge scoring by keyword density.
///
/// Crude on purpose: it exists so the full pipeline can run offline, not
/// to model a real evaluator.
pub struct HeuristicJudge;

#[async_trait]
impl Judge for HeuristicJudge {
    async fn evaluate(&self, request: JudgeRequest) -> Result<JudgeVerdict, CollaboratorError> {
        let lowered = request.message.to_lowercase();
        let base = (lowered.len() as f64 / 400.0).min(0.25);

        let scores: HashMap<String, serde_json::Value> = Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let hits = dimension_cues(dimension)
                    .iter()
                    .filter(|cue| lowered.contains(*cue))
                    .count() as f64;
                let score = (base + 0.3 * hits).min(1.0);
                (dimension.as_str().to_string(), json!(score))
            })
            .collect();

        Ok(JudgeVerdict {
            scores,
            rationale: "Heuristic keyword scoring over the coach message.".to_string(),
        })
    }
}

/// Template responder: builds a reply from the first sentence of the
/// behavioral profile plus a style-dependent tail.
pub struct TemplateResponder;

#[async_trait]
impl Responder for TemplateResponder {
    async fn reply(&self, request: ResponderRequest) -> Result<String, CollaboratorError> {
        let register = request
            .profile
            .split('.')
            .next()
            .unwrap_or("Responds plainly")
            .trim();
        let tail = match request.style {
            CoachingStyle::Directive => "I hear the advice; let me sit with it.",
            CoachingStyle::Explorative => "That question makes me think.",
            CoachingStyle::Mixed => "Alright, let me respond to that.",
        };
        Ok(format!("({register}.) {tail}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_heuristic_judge_scores_are_valid() {
        let judge = HeuristicJudge;
        let verdict = judge
            .evaluate(JudgeRequest {
                transcript: vec![],
                message: "What options do you have, and which trade-off matters most?".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(verdict.scores.len(), 6);
        for value in verdict.scores.values() {
            let v = value.as_f64().unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
        // Option/alternative cues should register.
        assert!(verdict.scores["alternatives"].as_f64().unwrap() >= 0.3);
    }

    #[tokio::test]
    async fn test_heuristic_judge_is_deterministic() {
        let judge = HeuristicJudge;
        let request = JudgeRequest {
            transcript: vec![],
            message: "Why does this matter?".to_string(),
        };
        let first = judge.evaluate(request.clone()).await.unwrap();
        let second = judge.evaluate(request).await.unwrap();
        assert_eq!(first.scores, second.scores);
    }

    #[tokio::test]
    async fn test_template_responder_uses_profile_register() {
        let responder = TemplateResponder;
        let reply = responder
            .reply(ResponderRequest {
                message: "What matters most?".to_string(),
                profile: "Answers in short, flat sentences. Deflects.".to_string(),
                persona_id: "guarded".to_string(),
                style: CoachingStyle::Explorative,
                history: vec![],
            })
            .await
            .unwrap();
        assert!(reply.contains("short, flat sentences"));
        assert!(reply.contains("question"));
    }
}
