/// Coaching-style detection over the coach's message.
///
/// Cheap keyword-pattern matching, not language understanding: the
/// result only parameterizes the Responder call.
use crate::domain::models::CoachingStyle;

/// Prescriptive, advice-giving phrasing.
const DIRECTIVE_MARKERS: &[&str] = &[
    "you should",
    "you must",
    "you need to",
    "you have to",
    "you ought to",
    "i recommend",
    "i suggest",
    "my advice",
    "the right move",
    "make sure",
    "do this",
    "don't do",
];

/// Open questions and invitations to explore.
const EXPLORATIVE_MARKERS: &[&str] = &[
    "what ",
    "how ",
    "why ",
    "which ",
    "who ",
    "tell me",
    "walk me through",
    "help me understand",
    "could you",
    "can you",
    "imagine",
    "suppose",
    "what's",
    "?",
];

/// Classifies a message as directive, explorative, or mixed.
///
/// Both registers present — or neither — yields `Mixed`, the neutral
/// parameterization.
pub fn classify(message: &str) -> CoachingStyle {
    let lowered = message.to_lowercase();
    let directive = DIRECTIVE_MARKERS.iter().any(|m| lowered.contains(m));
    let explorative = EXPLORATIVE_MARKERS.iter().any(|m| lowered.contains(m));

    match (directive, explorative) {
        (true, false) => CoachingStyle::Directive,
        (false, true) => CoachingStyle::Explorative,
        _ => CoachingStyle::Mixed,
    }
}
