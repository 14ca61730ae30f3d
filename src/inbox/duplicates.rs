use std::collections::BTreeMap;

use anyhow::Result;

use super::client::InboxClient;
use super::models::{ExistingEvent, IdentityKey, InboxStatus};

/// An identity key that occurs on more than one inbox row.
#[derive(Debug, Default, PartialEq)]
pub struct DuplicateGroup {
    pub key: IdentityKey,
    pub count: usize,
    /// Rows per status. Rows without a status are only in `count`.
    pub statuses: BTreeMap<InboxStatus, usize>,
}

impl DuplicateGroup {
    /// e.g. `pending: 2, rejected: 1`
    pub fn status_summary(&self) -> String {
        self.statuses
            .iter()
            .map(|(status, count)| format!("{}: {}", status, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Group rows by identity key and keep the keys seen more than once,
/// ordered by key.
pub fn find_duplicates(events: &[ExistingEvent]) -> Vec<DuplicateGroup> {
    let mut groups: BTreeMap<IdentityKey, DuplicateGroup> = BTreeMap::new();
    for event in events {
        let key = event.identity_key();
        let group = groups.entry(key.clone()).or_insert_with(|| DuplicateGroup {
            key,
            ..Default::default()
        });
        group.count += 1;
        if let Some(status) = event.status {
            *group.statuses.entry(status).or_default() += 1;
        }
    }

    groups.into_values().filter(|group| group.count > 1).collect()
}

/// Unlike dedup during a sync, a failed fetch here is an error since
/// an empty report would be misleading.
pub async fn inbox_duplicates(client: &InboxClient) -> Result<(usize, Vec<DuplicateGroup>)> {
    let events = client.fetch_events("title,start_date,status").await?;
    Ok((events.len(), find_duplicates(&events)))
}
