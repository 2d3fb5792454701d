//! Main store implementation.

use std::path::Path;

use rusqlite::Connection;
use time::OffsetDateTime;
use tracing::{debug, info};

use skycast_types::LookupRecord;

use crate::error::{Error, Result};
use crate::models::StoredLookup;
use crate::schema;

/// SQLite-based store for weather lookup history.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent read performance
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        // Initialize schema
        schema::initialize(&conn)?;

        Ok(Self { conn })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Append a lookup to the history.
    ///
    /// The timestamp is assigned here, not by the caller. Returns the row ID
    /// of the new entry.
    pub fn append(&self, record: &LookupRecord) -> Result<i64> {
        let now = OffsetDateTime::now_utc().unix_timestamp();

        self.conn.execute(
            "INSERT INTO history (city_name, country, temperature, weather_description, humidity, wind_speed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                &record.city_name,
                &record.country,
                record.temperature,
                &record.weather_description,
                record.humidity,
                record.wind_speed,
                now
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Recorded lookup of {} as history entry {}", record.city_name, id);
        Ok(id)
    }

    /// Get the most recent lookups, newest first.
    ///
    /// Entries recorded in the same second are ordered by row ID so the
    /// insertion order is preserved.
    pub fn recent(&self, limit: u32) -> Result<Vec<StoredLookup>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, city_name, country, temperature, weather_description, humidity, wind_speed, created_at
             FROM history
             ORDER BY created_at DESC, id DESC
             LIMIT ?1",
        )?;

        let entries = stmt
            .query_map([limit], |row| {
                Ok(StoredLookup {
                    id: row.get(0)?,
                    city_name: row.get(1)?,
                    country: row.get(2)?,
                    temperature: row.get(3)?,
                    weather_description: row.get(4)?,
                    humidity: row
                        .get::<_, Option<i64>>(5)?
                        .and_then(|v| u8::try_from(v).ok()),
                    wind_speed: row.get(6)?,
                    timestamp: OffsetDateTime::from_unix_timestamp(row.get(7)?).unwrap(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Delete all history entries, returning how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM history", [])?;
        info!("Cleared {} history entries", deleted);
        Ok(deleted)
    }

    /// Count the stored history entries.
    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count)
    }
}
