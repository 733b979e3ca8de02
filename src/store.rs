use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Fixed key the admin session snapshot is persisted under.
pub const SESSION_KEY: &str = "admin_session";

/// Durable key-value store for the session snapshot. Lives in an SQLite file
/// under the workspace directory so the snapshot survives daemon restarts.
/// The roster itself is never persisted here.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    pub fn open(workspace: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(workspace)?;
        let db_path = workspace.join("rosterd.sqlite3");
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings(
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(SessionStore { conn })
    }

    pub fn get_json(&self, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key = ?", [key], |r| {
                r.get(0)
            })
            .optional()?;
        match raw {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    pub fn set_json(&self, key: &str, value: &serde_json::Value) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, raw.as_str()],
        )?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?", [key])?;
        Ok(())
    }
}
