use anyhow::Result;
use journal_inbox::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
