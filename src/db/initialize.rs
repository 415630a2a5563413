use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the SQLite backend.
///
/// Every collection lives in the same `collections` table, one row per
/// document, ordered by `position`.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS collections (
            name     TEXT    NOT NULL,
            position INTEGER NOT NULL,
            body     TEXT    NOT NULL,
            PRIMARY KEY (name, position)
        );",
    )?;
    Ok(())
}
