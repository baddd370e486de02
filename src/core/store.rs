use std::path::Path;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::telemetry::{AnalyticsEvent, ClientStore, EventSink};
use crate::core::types::Dispute;

/// Client-local SQLite file: the anonymous id, the event log, and
/// submitted disputes.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS client (
              key TEXT PRIMARY KEY,
              value TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS events (
              seq INTEGER PRIMARY KEY AUTOINCREMENT,
              event TEXT NOT NULL,
              user_id TEXT NOT NULL,
              timestamp TEXT NOT NULL,
              data_json TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_events_name ON events(event);

            CREATE TABLE IF NOT EXISTS disputes (
              id TEXT PRIMARY KEY,
              report_url TEXT NOT NULL,
              fingerprint TEXT NOT NULL,
              user_id TEXT NOT NULL,
              submitted_at TEXT NOT NULL,
              data_json TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    pub fn append_event(&mut self, event: &AnalyticsEvent) -> Result<()> {
        let data_json = serde_json::to_string(event)?;
        self.conn.execute(
            "INSERT INTO events (event, user_id, timestamp, data_json) VALUES (?1, ?2, ?3, ?4)",
            params![
                event.data.name(),
                event.user_id,
                event.timestamp.to_rfc3339(),
                data_json
            ],
        )?;
        Ok(())
    }

    /// Events in insertion order. With a limit, only the most recent ones.
    pub fn events(&self, limit: Option<usize>) -> Result<Vec<AnalyticsEvent>> {
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = self.conn.prepare(
            "SELECT data_json FROM (
               SELECT seq, data_json FROM events ORDER BY seq DESC LIMIT ?1
             ) ORDER BY seq ASC",
        )?;
        let rows = stmt.query_map(params![limit], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            let json = row?;
            let event: AnalyticsEvent = serde_json::from_str(&json)?;
            out.push(event);
        }
        Ok(out)
    }

    /// Returns false when the same dispute was already on file.
    pub fn save_dispute(&mut self, dispute: &Dispute) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let exists: Option<String> = tx
            .query_row(
                "SELECT id FROM disputes WHERE id = ?1",
                params![dispute.id],
                |row| row.get(0),
            )
            .optional()?;
        let data_json = serde_json::to_string(dispute)?;
        tx.execute(
            "INSERT OR REPLACE INTO disputes (id, report_url, fingerprint, user_id, submitted_at, data_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                dispute.id,
                dispute.report_url,
                dispute.fingerprint,
                dispute.user_id,
                dispute.submitted_at.to_rfc3339(),
                data_json
            ],
        )?;
        tx.commit()?;
        Ok(exists.is_none())
    }

    pub fn disputes(&self) -> Result<Vec<Dispute>> {
        let mut stmt = self
            .conn
            .prepare("SELECT data_json FROM disputes ORDER BY submitted_at, id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            let json = row?;
            let dispute: Dispute = serde_json::from_str(&json)?;
            out.push(dispute);
        }
        Ok(out)
    }
}

impl ClientStore for Store {
    fn client_value(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM client WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_client_value(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO client (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl EventSink for Store {
    fn record(&mut self, event: &AnalyticsEvent) -> Result<()> {
        self.append_event(event)
    }
}
