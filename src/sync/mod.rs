//! Note to inbox pipeline: fetch the note, extract events, drop the
//! ones already proposed, and publish the rest. Each stage runs after
//! the previous one finishes and soft failures end the run early with
//! an outcome rather than an error.
use std::fmt;

use chrono::{Datelike, Local};

use crate::ai::{CompletionModel, extract_events, model_from_config};
use crate::core::AppConfig;
use crate::inbox::{InboxClient, InboxEvent, PublishOutcome, prepare_inbox_events, publish_events};
use crate::notes::get_note_text;

#[derive(Clone, Debug)]
pub struct SyncOptions {
    pub note_title: String,
    pub notes_db_path: String,
    /// Only events under this year's header are extracted
    pub year: i32,
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            note_title: config.note_title.clone(),
            notes_db_path: config.notes_db_path.clone(),
            year: Local::now().year(),
            dry_run: false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum SyncOutcome {
    NoteNotFound { title: String },
    NoEvents,
    MissingCredentials,
    NothingNew,
    DryRun(Vec<InboxEvent>),
    Published(usize),
    PublishFailed { status: Option<u16>, body: String },
}

impl SyncOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SyncOutcome::MissingCredentials | SyncOutcome::PublishFailed { .. }
        )
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyncOutcome::NoteNotFound { title } => write!(f, "Note \"{}\" not found.", title),
            SyncOutcome::NoEvents => write!(f, "No events were extracted from the note."),
            SyncOutcome::MissingCredentials => write!(f, "Error: Supabase credentials not found."),
            SyncOutcome::NothingNew => {
                write!(f, "No new events to sync (all duplicates/ignored).")
            }
            SyncOutcome::DryRun(events) => {
                write!(f, "Dry run: {} new events would be synced.", events.len())
            }
            SyncOutcome::Published(count) => write!(f, "Successfully synced {} events.", count),
            SyncOutcome::PublishFailed {
                status: Some(status),
                body,
            } => write!(f, "Error: {} - {}", status, body),
            SyncOutcome::PublishFailed { status: None, body } => {
                write!(f, "Error: request failed - {}", body)
            }
        }
    }
}

/// Run the pipeline with the model the config points at.
pub async fn run_sync(config: &AppConfig, options: &SyncOptions) -> SyncOutcome {
    let model = model_from_config(config);
    run_sync_with_model(config, options, model.as_ref()).await
}

pub async fn run_sync_with_model(
    config: &AppConfig,
    options: &SyncOptions,
    model: &(dyn CompletionModel + Send + Sync),
) -> SyncOutcome {
    let SyncOptions {
        note_title,
        notes_db_path,
        year,
        dry_run,
    } = options;

    tracing::info!("Looking for note \"{}\" in {}", note_title, notes_db_path);
    let Some(note) = get_note_text(notes_db_path, note_title).await else {
        return SyncOutcome::NoteNotFound {
            title: note_title.clone(),
        };
    };

    tracing::info!(
        "Found note (length: {}). Sending to {}...",
        note.len(),
        model.model_name()
    );
    let candidates = extract_events(model, &note, *year).await;
    tracing::info!("Model returned {} potential events", candidates.len());

    if candidates.is_empty() {
        return SyncOutcome::NoEvents;
    }

    let client = config.supabase.as_ref().map(InboxClient::new);

    if *dry_run {
        // Without credentials there is nothing to dedup against so
        // everything is shown
        let existing = match &client {
            Some(client) => client.existing_identity_keys().await,
            None => Default::default(),
        };
        return SyncOutcome::DryRun(prepare_inbox_events(candidates, &existing));
    }

    let Some(client) = client else {
        return SyncOutcome::MissingCredentials;
    };

    match publish_events(&client, candidates).await {
        PublishOutcome::NothingNew => SyncOutcome::NothingNew,
        PublishOutcome::Published(count) => SyncOutcome::Published(count),
        PublishOutcome::Failed { status, body } => SyncOutcome::PublishFailed { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            SyncOutcome::NoteNotFound {
                title: String::from("Daily Log")
            }
            .to_string(),
            "Note \"Daily Log\" not found."
        );
        assert_eq!(
            SyncOutcome::Published(3).to_string(),
            "Successfully synced 3 events."
        );
        assert_eq!(
            SyncOutcome::PublishFailed {
                status: Some(500),
                body: String::from("boom"),
            }
            .to_string(),
            "Error: 500 - boom"
        );
        assert_eq!(
            SyncOutcome::PublishFailed {
                status: None,
                body: String::from("connection refused"),
            }
            .to_string(),
            "Error: request failed - connection refused"
        );
    }

    #[test]
    fn test_only_missing_credentials_and_failed_publish_are_failures() {
        assert!(SyncOutcome::MissingCredentials.is_failure());
        assert!(
            SyncOutcome::PublishFailed {
                status: Some(500),
                body: String::new()
            }
            .is_failure()
        );
        assert!(!SyncOutcome::NoEvents.is_failure());
        assert!(!SyncOutcome::NothingNew.is_failure());
        assert!(!SyncOutcome::Published(1).is_failure());
    }
}
