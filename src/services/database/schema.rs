use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    run_settings_migrations(conn)?;
    insert_default_settings(conn)?;
    create_applications_table(conn)?;
    create_events_table(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            theme TEXT NOT NULL DEFAULT 'light',
            max_visible_rows INTEGER NOT NULL DEFAULT 3,
            urgency_lookback_hours INTEGER NOT NULL DEFAULT 2,
            urgency_lookahead_hours INTEGER NOT NULL DEFAULT 48,
            default_span_days INTEGER NOT NULL DEFAULT 3,
            current_view TEXT NOT NULL DEFAULT 'Applications',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn run_settings_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "settings",
        "default_span_days",
        "ALTER TABLE settings ADD COLUMN default_span_days INTEGER NOT NULL DEFAULT 3",
    )?;

    migrations::ensure_column(
        conn,
        "settings",
        "current_view",
        "ALTER TABLE settings ADD COLUMN current_view TEXT NOT NULL DEFAULT 'Applications'",
    )?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, theme) VALUES (1, 'light')",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

fn create_applications_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS applications (
            id TEXT PRIMARY KEY,
            company TEXT NOT NULL,
            position TEXT NOT NULL,
            apply_date TEXT NOT NULL,
            industry TEXT NOT NULL DEFAULT '',
            company_type TEXT NOT NULL DEFAULT 'Other',
            status TEXT NOT NULL DEFAULT 'Applied',
            note TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create applications table")?;

    Ok(())
}

fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            application_id TEXT NOT NULL REFERENCES applications(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'Other',
            start_datetime TEXT NOT NULL,
            end_datetime TEXT,
            is_completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create events table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_application ON events(application_id)",
        [],
    )
    .context("Failed to create events application index")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_start ON events(start_datetime)",
        [],
    )
    .context("Failed to create events start index")?;

    Ok(())
}
