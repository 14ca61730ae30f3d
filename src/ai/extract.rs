use anyhow::{Error, Result};
use serde_json::Value;

use super::model::CompletionModel;
use super::prompt::event_extraction_prompt;
use crate::inbox::CandidateEvent;

/// Parse a model reply that should be a bare JSON array of events.
/// Errors only when the reply isn't an array. Items that don't
/// describe an event are logged and skipped so one loose item doesn't
/// cost the rest of the batch.
pub fn parse_events(reply: &str) -> Result<Vec<CandidateEvent>, Error> {
    let items = serde_json::from_str::<Vec<Value>>(reply.trim())?;
    let events = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            serde_json::from_value::<CandidateEvent>(item.clone())
                .inspect_err(|e| tracing::warn!("Skipping event {}: {}\nItem: {}", idx, e, item))
                .ok()
        })
        .collect();
    Ok(events)
}

async fn try_extract_events(
    model: &(dyn CompletionModel + Send + Sync),
    note_text: &str,
    year: i32,
) -> Result<Vec<CandidateEvent>, Error> {
    let prompt = event_extraction_prompt(note_text, year)?;
    let reply = model.complete_json(&prompt).await?;
    tracing::debug!("Raw response from {}: {}", model.model_name(), reply);

    parse_events(&reply).inspect_err(|e| {
        tracing::error!("Model reply is not a list of events: {}\nReply: {}", e, reply)
    })
}

/// Ask the model for the events under `year` in the note. Any failure
/// along the way is logged and treated as no events.
pub async fn extract_events(
    model: &(dyn CompletionModel + Send + Sync),
    note_text: &str,
    year: i32,
) -> Vec<CandidateEvent> {
    match try_extract_events(model, note_text, year).await {
        Ok(events) => events,
        Err(e) => {
            tracing::error!("Event extraction failed: {}", e);
            Vec::new()
        }
    }
}
