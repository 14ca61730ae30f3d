use async_trait::async_trait;
use std::time::Duration;

use super::PeriodicJob;
use crate::core::AppConfig;
use crate::sync::{SyncOptions, run_sync};

/// Pulls new events out of the journal note and into the inbox.
#[derive(Default, Debug)]
pub struct SyncJournalEvents;

#[async_trait]
impl PeriodicJob for SyncJournalEvents {
    fn interval(&self) -> Duration {
        // Hourly
        Duration::from_secs(60 * 60)
    }

    async fn run_job(&self, config: &AppConfig) {
        tracing::info!("Starting journal event sync job");

        let options = SyncOptions::from_config(config);
        let outcome = run_sync(config, &options).await;

        if outcome.is_failure() {
            tracing::error!("Journal event sync failed: {}", outcome);
        } else {
            tracing::info!("Completed journal event sync job: {}", outcome);
        }
    }
}
