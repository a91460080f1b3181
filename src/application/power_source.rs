// Data source trait for power telemetry
use async_trait::async_trait;

use crate::domain::snapshot::Snapshot;

#[async_trait]
pub trait PowerDataSource: Send + Sync {
    /// Fetch the most recent window of per-channel power samples as a
    /// validated snapshot.
    async fn fetch_snapshot(&self) -> anyhow::Result<Snapshot>;
}
