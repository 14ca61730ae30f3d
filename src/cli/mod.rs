use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod duplicates;
pub mod job;
pub mod sync;

use crate::core::AppConfig;
use job::JobId;

#[derive(Subcommand)]
enum Command {
    /// Extract events from the journal note and add new ones to the inbox
    Sync {
        /// Title of the note to read
        #[arg(long)]
        note_title: Option<String>,

        /// Year header to extract events from, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Path to the Bear database
        #[arg(long)]
        db_path: Option<String>,

        /// Print the events that would be added without adding them
        #[arg(long, action, default_value = "false")]
        dry_run: bool,
    },
    /// Run a periodic job
    Job {
        #[arg(long, value_enum)]
        id: JobId,

        /// Keep running the job on its interval until interrupted
        #[arg(long, action, default_value = "false")]
        watch: bool,
    },
    /// Report inbox events that share a title and start date
    Duplicates {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Values already in the environment win over the files
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    // Handle each sub command
    match args.command {
        Some(Command::Sync {
            note_title,
            year,
            db_path,
            dry_run,
        }) => {
            sync::run(&config, note_title, year, db_path, dry_run).await?;
        }
        Some(Command::Job { id, watch }) => {
            job::run(&config, id, watch).await?;
        }
        Some(Command::Duplicates {}) => {
            duplicates::run(&config).await?;
        }
        None => {
            sync::run(&config, None, None, None, false).await?;
        }
    }

    Ok(())
}
