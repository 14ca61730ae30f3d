use anyhow::Result;
use rusqlite::OpenFlags;
use tokio_rusqlite::Connection;

/// Opens an existing SQLite file without write access. Fails rather than
/// creating the file when it doesn't exist.
pub async fn async_readonly_db(db_path: &str) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let db = Connection::open_with_flags(db_path, flags).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_refuses_to_create_a_missing_db() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sqlite");

        let result = async_readonly_db(path.to_str().unwrap()).await;

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn it_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.sqlite");
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE t (id INTEGER);")
            .unwrap();

        let db = async_readonly_db(path.to_str().unwrap()).await.unwrap();
        let result = db
            .call(|conn| {
                conn.execute("INSERT INTO t (id) VALUES (1)", [])?;
                Ok(())
            })
            .await;

        assert!(result.is_err());
    }
}
