use anyhow::Result;

use crate::core::AppConfig;
use crate::sync::{SyncOptions, SyncOutcome, run_sync};

pub async fn run(
    config: &AppConfig,
    note_title: Option<String>,
    year: Option<i32>,
    db_path: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let defaults = SyncOptions::from_config(config);
    let options = SyncOptions {
        note_title: note_title.unwrap_or(defaults.note_title),
        notes_db_path: db_path.unwrap_or(defaults.notes_db_path),
        year: year.unwrap_or(defaults.year),
        dry_run,
    };

    let outcome = run_sync(config, &options).await;

    if let SyncOutcome::DryRun(events) = &outcome {
        for event in events {
            println!("{}", serde_json::to_string_pretty(event)?);
        }
    }
    println!("{}", outcome);

    Ok(())
}
