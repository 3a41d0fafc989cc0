/// Summary sink backed by structured logging. Stands in for the
/// longitudinal-tracking collaborator when none is wired up.
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::domain::models::SessionSummary;
use crate::domain::ports::SummarySink;

pub struct LoggingSummarySink;

#[async_trait]
impl SummarySink for LoggingSummarySink {
    async fn record(&self, session_id: &str, summary: &SessionSummary) -> Result<()> {
        info!(
            session_id,
            persona_id = %summary.persona_id,
            stage = %summary.stage,
            turns_used = summary.turns_used,
            completed = summary.completed_dimensions.len(),
            missed = summary.missed_dimensions.len(),
            feedback = %summary.feedback,
            "session reached terminal status"
        );
        Ok(())
    }
}
