/// Summary sink port: the persistence collaborator that receives
/// completed-session summaries for longitudinal tracking.
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::SessionSummary;

/// Port trait for summary delivery. Failures are logged by the caller
/// and never fail the turn.
#[async_trait]
pub trait SummarySink: Send + Sync {
    async fn record(&self, session_id: &str, summary: &SessionSummary) -> Result<()>;
}
