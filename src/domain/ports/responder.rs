/// Responder port: the external generator that produces persona dialogue
/// from a selected behavioral profile.
use async_trait::async_trait;

use super::errors::CollaboratorError;
use crate::domain::models::{CoachingStyle, TranscriptTurn};

/// Parameters for one reply generation.
#[derive(Debug, Clone)]
pub struct ResponderRequest {
    /// The coach message being replied to.
    pub message: String,

    /// Behavioral-profile text for the persona's resolved stage. Any
    /// reply-length convention it states is enforced by the generator,
    /// not by this layer.
    pub profile: String,

    /// Persona identifier, for generator-side context.
    pub persona_id: String,

    /// Detected coaching style of the current message.
    pub style: CoachingStyle,

    /// Conversation history.
    pub history: Vec<TranscriptTurn>,
}

/// Port trait for the external Responder.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Generates the persona's reply text.
    async fn reply(&self, request: ResponderRequest) -> Result<String, CollaboratorError>;
}
