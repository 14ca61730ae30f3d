use anyhow::Result;

use crate::core::AppConfig;
use crate::jobs::{PeriodicJob, SyncJournalEvents};

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum JobId {
    SyncJournalEvents,
}

pub async fn run(config: &AppConfig, id: JobId, watch: bool) -> Result<()> {
    let job: Box<dyn PeriodicJob> = match id {
        JobId::SyncJournalEvents => Box::new(SyncJournalEvents),
    };

    loop {
        println!("Running job: {:?}", id);
        job.run_job(config).await;
        println!("Job completed");

        if !watch {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(job.interval()) => {}
            _ = tokio::signal::ctrl_c() => {
                println!("Stopping job: {:?}", id);
                break;
            }
        }
    }

    Ok(())
}
