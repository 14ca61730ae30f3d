use anyhow::{Result, anyhow};

use crate::core::AppConfig;
use crate::inbox::{InboxClient, inbox_duplicates};

pub async fn run(config: &AppConfig) -> Result<()> {
    let supabase = config
        .supabase
        .as_ref()
        .ok_or(anyhow!("Supabase credentials not found"))?;
    let client = InboxClient::new(supabase);

    println!("Checking for duplicates in inbox_events...");
    let (total, groups) = inbox_duplicates(&client).await?;
    println!("Found {} total inbox events.", total);

    if groups.is_empty() {
        println!("No duplicates found by title + start date.");
        return Ok(());
    }

    println!(
        "Found {} titles with duplicate entries on the same start date:",
        groups.len()
    );
    for group in groups {
        println!(
            "  {} ({} rows: {})",
            group.key,
            group.count,
            group.status_summary()
        );
    }

    Ok(())
}
