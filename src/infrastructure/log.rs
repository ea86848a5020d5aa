use crate::domain::ports::{ActivityEntry, ActivityLog, ActivityResult};
use crate::error::Result;
use async_trait::async_trait;

/// Activity log that forwards entries to the tracing subscriber.
///
/// Standalone hosts (like the batch binary) use it in place of a billing
/// platform's activity feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingActivityLog;

#[async_trait]
impl ActivityLog for TracingActivityLog {
    async fn log(&self, entry: ActivityEntry) -> Result<()> {
        match entry.result {
            ActivityResult::Success => {
                tracing::info!(output = %entry.output, "gateway capture succeeded");
            }
            ActivityResult::Failure => {
                tracing::warn!(output = %entry.output, "gateway capture failed");
            }
        }
        Ok(())
    }
}
