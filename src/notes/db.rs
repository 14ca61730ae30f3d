//! Read-only queries against Bear's note database
use anyhow::Result;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use crate::core::db::async_readonly_db;

/// Find the body of a live note by its exact title. Trashed and
/// archived notes are ignored.
pub async fn find_note_text_by_title(
    db: &Connection,
    title: &str,
) -> Result<Option<String>, anyhow::Error> {
    let title = title.to_owned();
    db.call(move |conn| {
        let text = conn
            .prepare(
                r"
          SELECT ZTEXT
          FROM ZSFNOTE
          WHERE ZTITLE = ?1
            AND ZTRASHED = 0
            AND ZARCHIVED = 0
          LIMIT 1
        ",
            )?
            .query_row([title], |row| row.get::<_, Option<String>>(0))
            .optional()?
            .flatten();
        Ok(text)
    })
    .await
    .map_err(|e| e.into())
}

/// Returns the note's text or `None` when it can't be found for any
/// reason, including the database being missing or unreadable.
pub async fn get_note_text(db_path: &str, title: &str) -> Option<String> {
    let db = match async_readonly_db(db_path).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open notes db at {}: {}", db_path, e);
            return None;
        }
    };

    match find_note_text_by_title(&db, title).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to query note \"{}\": {}", title, e);
            None
        }
    }
}
