use async_trait::async_trait;
use std::time::Duration;

use crate::core::AppConfig;

pub mod sync_journal_events;
pub use sync_journal_events::SyncJournalEvents;

/// A job that can be run once or repeatedly on a fixed interval.
#[async_trait]
pub trait PeriodicJob: Send + Sync {
    fn interval(&self) -> Duration;
    async fn run_job(&self, config: &AppConfig);
}
