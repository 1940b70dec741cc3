// Settings service
// Load and persist the single settings row

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::params;

use crate::models::settings::Settings;
use crate::services::database::Database;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Load the settings row, falling back to defaults for anything the
    /// row predates.
    pub fn get(&self) -> Result<Settings> {
        let settings = self
            .db
            .connection()
            .query_row(
                "SELECT id, theme, max_visible_rows, urgency_lookback_hours,
                        urgency_lookahead_hours, default_span_days, current_view
                 FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok(Settings {
                        id: Some(row.get(0)?),
                        theme: row.get(1)?,
                        max_visible_rows: row.get::<_, i64>(2)?.max(0) as usize,
                        urgency_lookback_hours: row.get(3)?,
                        urgency_lookahead_hours: row.get(4)?,
                        default_span_days: row.get(5)?,
                        current_view: row.get(6)?,
                    })
                },
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Persist the settings row.
    pub fn update(&self, settings: &Settings) -> Result<()> {
        self.db
            .connection()
            .execute(
                "UPDATE settings SET
                    theme = ?, max_visible_rows = ?, urgency_lookback_hours = ?,
                    urgency_lookahead_hours = ?, default_span_days = ?,
                    current_view = ?, updated_at = ?
                 WHERE id = 1",
                params![
                    settings.theme,
                    settings.max_visible_rows as i64,
                    settings.urgency_lookback_hours,
                    settings.urgency_lookahead_hours,
                    settings.default_span_days,
                    settings.current_view,
                    Local::now().to_rfc3339(),
                ],
            )
            .context("Failed to update settings")?;

        Ok(())
    }
}
