use crate::core::Pipeline;
use crate::domain::model::{InvocationResult, StoredObject};
use crate::utils::error::Result;

/// Drives one fetch-validate-upload invocation and folds every failure into
/// an [`InvocationResult`] for the trigger.
pub struct SyncEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SyncEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs the full flow. Never returns `Err`: every error kind is logged
    /// once and mapped onto the result's outcome and status.
    pub async fn run(&self, invocation_id: &str) -> InvocationResult {
        tracing::info!(invocation_id, "starting feed sync");

        match self.execute(invocation_id).await {
            Ok(stored) => {
                tracing::info!(
                    bucket = %stored.bucket,
                    key = %stored.key,
                    bytes = stored.bytes,
                    "feed stored"
                );
                InvocationResult::success(&stored)
            }
            Err(err) => {
                tracing::error!(
                    outcome = ?err.outcome(),
                    status = err.status_code(),
                    error = %err,
                    "feed sync failed"
                );
                InvocationResult::from_error(&err)
            }
        }
    }

    async fn execute(&self, invocation_id: &str) -> Result<StoredObject> {
        let payload = self.pipeline.fetch().await?;
        tracing::debug!(bytes = payload.len(), "feed payload validated");

        // Upload happens only once the payload is fully validated in memory;
        // no failure path leaves a partial object behind.
        self.pipeline.store(&payload, invocation_id).await
    }
}
