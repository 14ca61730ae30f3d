//! PostgREST client for the `inbox_events` table
use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Error, Result};
use reqwest::StatusCode;

use super::models::{ExistingEvent, IdentityKey, InboxEvent};
use crate::core::SupabaseConfig;

const INBOX_TABLE_PATH: &str = "rest/v1/inbox_events";

/// What happened to a batch insert. The batch is a single request so
/// it either lands whole or not at all.
#[derive(Debug, PartialEq)]
pub enum InsertResult {
    Inserted(usize),
    Rejected { status: Option<u16>, body: String },
}

#[derive(Clone, Debug)]
pub struct InboxClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl InboxClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url, INBOX_TABLE_PATH)
    }

    fn get(&self) -> reqwest::RequestBuilder {
        self.client
            .get(self.url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(60))
    }

    /// Fetch every row in the inbox regardless of status with only the
    /// `select`ed columns.
    pub async fn fetch_events(&self, select: &str) -> Result<Vec<ExistingEvent>, Error> {
        let events = self
            .get()
            .query(&[("select", select)])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<ExistingEvent>>()
            .await?;
        Ok(events)
    }

    /// Identity keys of everything already proposed, including accepted
    /// and rejected events so nothing is ever proposed twice.
    ///
    /// Fails open: any error yields an empty set.
    pub async fn existing_identity_keys(&self) -> HashSet<IdentityKey> {
        match self.fetch_events("title,start_date").await {
            Ok(events) => events.iter().map(ExistingEvent::identity_key).collect(),
            Err(e) => {
                tracing::warn!(
                    "Fetching existing inbox events failed, continuing without dedup: {}",
                    e
                );
                HashSet::new()
            }
        }
    }

    /// Insert all rows in one request.
    pub async fn insert_events(&self, events: &[InboxEvent]) -> InsertResult {
        let response = self
            .client
            .post(self.url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .timeout(Duration::from_secs(60))
            .json(events)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Inbox insert request failed: {}", e);
                return InsertResult::Rejected {
                    status: None,
                    body: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            return InsertResult::Inserted(events.len());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("Inbox insert rejected with {}: {}", status, body);
        InsertResult::Rejected {
            status: Some(status.as_u16()),
            body,
        }
    }
}
