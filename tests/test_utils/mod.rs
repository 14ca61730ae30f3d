//! Test utilities for integration tests
use std::path::{Path, PathBuf};

use journal_inbox::core::{AppConfig, LlmProvider, SupabaseConfig};
use journal_inbox::sync::SyncOptions;
use serde_json::json;

pub const GEMINI_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
pub const INBOX_PATH: &str = "/rest/v1/inbox_events";

/// A note row as Bear stores it.
pub struct TestNote<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub trashed: bool,
    pub archived: bool,
}

impl<'a> TestNote<'a> {
    pub fn live(title: &'a str, text: &'a str) -> Self {
        Self {
            title,
            text,
            trashed: false,
            archived: false,
        }
    }
}

/// Writes a minimal Bear database into `dir` containing `notes`.
pub fn bear_db(dir: &Path, notes: &[TestNote]) -> PathBuf {
    let path = dir.join("database.sqlite");
    let conn = rusqlite::Connection::open(&path).expect("Failed to create test db");
    conn.execute_batch(
        r"
        CREATE TABLE ZSFNOTE (
            Z_PK INTEGER PRIMARY KEY,
            ZTITLE VARCHAR,
            ZTEXT VARCHAR,
            ZTRASHED INTEGER,
            ZARCHIVED INTEGER
        );
        ",
    )
    .expect("Failed to create ZSFNOTE");

    for note in notes {
        conn.execute(
            "INSERT INTO ZSFNOTE (ZTITLE, ZTEXT, ZTRASHED, ZARCHIVED) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![note.title, note.text, note.trashed, note.archived],
        )
        .expect("Failed to insert note");
    }
    path
}

pub fn test_config(llm_url: &str, supabase_url: Option<&str>, db_path: &Path) -> AppConfig {
    AppConfig {
        llm_provider: LlmProvider::Gemini,
        llm_api_hostname: llm_url.to_string(),
        llm_api_key: String::from("test-gemini-key"),
        llm_model: String::from("gemini-2.5-flash"),
        notes_db_path: db_path.display().to_string(),
        note_title: String::from("Daily Log"),
        supabase: supabase_url.map(|url| SupabaseConfig {
            url: url.to_string(),
            api_key: String::from("test-service-key"),
        }),
    }
}

pub fn test_options(config: &AppConfig) -> SyncOptions {
    SyncOptions {
        note_title: config.note_title.clone(),
        notes_db_path: config.notes_db_path.clone(),
        year: 2026,
        dry_run: false,
    }
}

/// A `generateContent` response whose only text part is `text`.
pub fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
