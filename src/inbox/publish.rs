use std::collections::HashSet;

use super::client::{InboxClient, InsertResult};
use super::models::{CandidateEvent, IdentityKey, InboxEvent};

#[derive(Debug, PartialEq)]
pub enum PublishOutcome {
    NothingNew,
    Published(usize),
    Failed { status: Option<u16>, body: String },
}

/// Keep candidates whose identity key isn't already in the inbox. Repeats
/// within the batch are dropped after the first.
pub fn filter_new_events(
    candidates: Vec<CandidateEvent>,
    existing: &HashSet<IdentityKey>,
) -> Vec<CandidateEvent> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|event| {
            let key = event.identity_key();
            !existing.contains(&key) && seen.insert(key)
        })
        .collect()
}

/// Turn novel candidates into pending inbox rows.
pub fn prepare_inbox_events(
    candidates: Vec<CandidateEvent>,
    existing: &HashSet<IdentityKey>,
) -> Vec<InboxEvent> {
    filter_new_events(candidates, existing)
        .into_iter()
        .map(InboxEvent::pending)
        .collect()
}

/// Dedup against the inbox and insert what's left as a single batch. No
/// request is made when nothing is new.
pub async fn publish_events(
    client: &InboxClient,
    candidates: Vec<CandidateEvent>,
) -> PublishOutcome {
    let existing = client.existing_identity_keys().await;
    tracing::debug!("Found {} existing inbox events", existing.len());

    let rows = prepare_inbox_events(candidates, &existing);
    if rows.is_empty() {
        return PublishOutcome::NothingNew;
    }

    match client.insert_events(&rows).await {
        InsertResult::Inserted(count) => PublishOutcome::Published(count),
        InsertResult::Rejected { status, body } => PublishOutcome::Failed { status, body },
    }
}
