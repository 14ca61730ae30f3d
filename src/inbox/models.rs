use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix for `external_id` so rows synced from Bear can be told apart
/// from other inbox sources.
const EXTERNAL_ID_PREFIX: &str = "bear";

// Number of title characters carried into the external ID
const EXTERNAL_ID_TITLE_CHARS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DeepWork,
    ShallowWork,
    Meeting,
    Life,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboxStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for InboxStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = match self {
            InboxStatus::Pending => "pending",
            InboxStatus::Accepted => "accepted",
            InboxStatus::Rejected => "rejected",
        };
        f.write_str(status)
    }
}

/// An event proposed by the model. Dates are kept as the model wrote
/// them since deduplication compares the raw strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "ModelEvent")]
pub struct CandidateEvent {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub category: Category,
}

// What the model actually writes. Single-day events sometimes come
// back with a null or missing `end_date`.
#[derive(Deserialize)]
struct ModelEvent {
    title: String,
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
    category: Category,
}

impl From<ModelEvent> for CandidateEvent {
    fn from(event: ModelEvent) -> Self {
        let end_date = event.end_date.unwrap_or_else(|| event.start_date.clone());
        Self {
            title: event.title,
            start_date: event.start_date,
            end_date,
            category: event.category,
        }
    }
}

impl CandidateEvent {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.title, &self.start_date)
    }
}

/// A row in the remote `inbox_events` table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InboxEvent {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub category: Category,
    pub status: InboxStatus,
    pub external_id: String,
}

impl InboxEvent {
    pub fn pending(candidate: CandidateEvent) -> Self {
        let external_id = external_id(&candidate.title);
        Self {
            title: candidate.title,
            start_date: candidate.start_date,
            end_date: candidate.end_date,
            category: candidate.category,
            status: InboxStatus::Pending,
            external_id,
        }
    }
}

/// The projection fetched from the inbox for deduplication.
#[derive(Clone, Debug, Deserialize)]
pub struct ExistingEvent {
    pub title: String,
    pub start_date: String,
    #[serde(default)]
    pub status: Option<InboxStatus>,
}

impl ExistingEvent {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.title, &self.start_date)
    }
}

/// `title|start_date`, compared exactly with no normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(title: &str, start_date: &str) -> Self {
        Self(format!("{}|{}", title, start_date))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Timestamp plus a title prefix identifies the row for humans. The
/// random suffix keeps two events with the same prefix created in the
/// same instant from colliding.
fn external_id(title: &str) -> String {
    let now = Utc::now();
    let timestamp = format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros());
    let title_prefix: String = title.chars().take(EXTERNAL_ID_TITLE_CHARS).collect();
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}_{}",
        EXTERNAL_ID_PREFIX,
        timestamp,
        title_prefix,
        &suffix[..8]
    )
}
