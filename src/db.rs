use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, ErrorCode, params};
use tracing::{info, warn};

use crate::app::{Show, StoreError, WatchStore, decode_season_lengths, encode_season_lengths};

const SCHEMA_VERSION: i32 = 2;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.migrate()?;
        Ok(db)
    }

    pub fn migrate(&self) -> Result<()> {
        let version: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .context("failed to read schema version")?;

        if version < 1 {
            self.conn
                .execute_batch(
                    r#"
                    BEGIN;
                    CREATE TABLE IF NOT EXISTS series (name TEXT, season_lengths TEXT);
                    CREATE TABLE IF NOT EXISTS episodes (series TEXT, number INT, watched INT);
                    PRAGMA user_version = 1;
                    COMMIT;
                    "#,
                )
                .context("failed to create schema")?;
        }

        if version < 2 {
            self.conn
                .execute_batch(
                    r#"
                    BEGIN;
                    ALTER TABLE series ADD COLUMN deleted INTEGER NOT NULL DEFAULT 0;
                    ALTER TABLE episodes ADD COLUMN watched_at TEXT;
                    DELETE FROM series
                        WHERE rowid NOT IN (SELECT MIN(rowid) FROM series GROUP BY name);
                    DELETE FROM episodes
                        WHERE rowid NOT IN (
                            SELECT MIN(rowid) FROM episodes WHERE watched = 1 GROUP BY series, number
                        );
                    CREATE UNIQUE INDEX IF NOT EXISTS idx_series_name ON series(name);
                    CREATE UNIQUE INDEX IF NOT EXISTS idx_episodes_series_number
                        ON episodes(series, number);
                    PRAGMA user_version = 2;
                    COMMIT;
                    "#,
                )
                .context("failed to upgrade schema to version 2")?;
        }

        if version < SCHEMA_VERSION {
            info!(from = version, to = SCHEMA_VERSION, "migrated database schema");
        }
        Ok(())
    }

    pub fn watched_count(&self, name: &str) -> Result<u32, StoreError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM episodes WHERE series = ?1 AND watched = 1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn set_deleted(&self, name: &str, deleted: bool) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE series SET deleted = ?2 WHERE name = ?1",
            params![name, deleted],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownShow(name.to_string()));
        }
        Ok(())
    }
}

impl WatchStore for Database {
    fn list_shows(&self) -> Result<Vec<Show>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, season_lengths, deleted FROM series ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, bool>(2)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (name, raw_lengths, deleted) = row?;
            let raw_lengths = raw_lengths.unwrap_or_default();
            let Some(season_lengths) = decode_season_lengths(&raw_lengths) else {
                warn!(show = %name, raw = %raw_lengths, "skipping show with unreadable season lengths");
                continue;
            };
            out.push(Show {
                name,
                season_lengths,
                deleted,
            });
        }
        Ok(out)
    }

    fn create_show(&self, show: &Show) -> Result<(), StoreError> {
        let inserted = self.conn.execute(
            "INSERT INTO series (name, season_lengths, deleted) VALUES (?1, ?2, ?3)",
            params![
                show.name,
                encode_season_lengths(&show.season_lengths),
                show.deleted
            ],
        );
        match inserted {
            Ok(_) => {
                info!(show = %show.name, seasons = show.season_count(), "created show");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateShow(show.name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn soft_delete_show(&self, name: &str) -> Result<(), StoreError> {
        self.set_deleted(name, true)?;
        info!(show = %name, "soft-deleted show");
        Ok(())
    }

    fn restore_show(&self, name: &str) -> Result<(), StoreError> {
        self.set_deleted(name, false)?;
        info!(show = %name, "restored show");
        Ok(())
    }

    fn is_watched(&self, name: &str, number: u32) -> Result<bool, StoreError> {
        let watched = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM episodes WHERE series = ?1 AND number = ?2 AND watched = 1)",
            params![name, number],
            |row| row.get(0),
        )?;
        Ok(watched)
    }

    fn mark_watched(&self, name: &str, number: u32) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            r#"
            INSERT INTO episodes (series, number, watched, watched_at)
            VALUES (?1, ?2, 1, ?3)
            ON CONFLICT(series, number) DO UPDATE SET
                watched = 1,
                watched_at = COALESCE(episodes.watched_at, excluded.watched_at)
            "#,
            params![name, number, now],
        )?;
        info!(show = %name, number, "marked episode watched");
        Ok(())
    }
}
