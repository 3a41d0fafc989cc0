/// Judge port: the external evaluator that scores a coaching message
/// along the six decision-quality dimensions.
use async_trait::async_trait;

use super::errors::CollaboratorError;
use crate::domain::models::{JudgeVerdict, TranscriptTurn};

/// Everything the Judge sees for one evaluation.
#[derive(Debug, Clone)]
pub struct JudgeRequest {
    /// Conversation so far, including prior persona replies for joint
    /// context.
    pub transcript: Vec<TranscriptTurn>,

    /// The coach message under evaluation.
    pub message: String,
}

/// Port trait for the external Judge.
///
/// The verdict's shape is untrusted and always passes through the
/// sanitizer before anything downstream reads it.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for concurrent use across tokio
/// tasks.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Scores `request.message` in the context of the transcript.
    ///
    /// # Errors
    /// - `CollaboratorError::RateLimited` / `Overloaded` / `ServerError` /
    ///   `Timeout` — transient; the caller retries with backoff
    /// - any other variant — permanent for this turn
    async fn evaluate(&self, request: JudgeRequest) -> Result<JudgeVerdict, CollaboratorError>;
}
